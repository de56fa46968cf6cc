//! # Report Layout Module
//!
//! Turns the raw grid of the fixed-layout report into the two output tables:
//! the translated two-level data table and the flattened description table.
//! Row positions are configuration, not discovered structure.
use crate::error::ConvertError;

pub mod header;
pub mod table;
pub mod translate;

pub use header::Header;
pub use table::{DataTable, DescriptionTable};
pub use translate::Translator;

/// Fixed row positions of the source report (all zero-based).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// First header row (level-1 labels, merged cells)
    pub header_row_1: usize,
    /// Second header row (level-2 labels, also the explanation text)
    pub header_row_2: usize,
    /// First row of the data region; the row between it and the header is a divider
    pub data_start_row: usize,
    /// Number of preamble rows at the top of the sheet
    pub preamble_row_count: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            header_row_1: 7,
            header_row_2: 8,
            data_start_row: 10,
            preamble_row_count: 7,
        }
    }
}

impl Layout {
    /// Checks that the header rows are ordered and the data region starts below them.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.header_row_1 >= self.header_row_2 {
            return Err(ConvertError::InvalidLayout(format!(
                "header_row_1 ({}) must be above header_row_2 ({})",
                self.header_row_1, self.header_row_2
            )));
        }
        if self.data_start_row <= self.header_row_2 {
            return Err(ConvertError::InvalidLayout(format!(
                "data_start_row ({}) must be below header_row_2 ({})",
                self.data_start_row, self.header_row_2
            )));
        }
        Ok(())
    }
}
