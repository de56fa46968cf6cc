//! # Spreadsheet Reading Module
//!
//! Low-level extraction of cell text from an `.xlsx` container. The reader
//! works directly on the archive parts instead of going through a full
//! workbook model, so files whose style parts are malformed still load.
use thiserror::Error;

pub mod grid;
pub mod reference;
pub mod xlsx;

pub use grid::Grid;
pub use xlsx::XlsxSpreadsheet;

/// Errors raised while turning a workbook into a grid.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// A required part is absent from the container
    #[error("Expected '{0}' not found in workbook")]
    FormatError(String),

    /// The grid is too short for a configured row (1-based in the message)
    #[error("Row {} is required but the sheet has only {rows} rows", .row + 1)]
    MissingRow { row: usize, rows: usize },
}
