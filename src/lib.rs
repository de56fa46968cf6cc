//! # XLSX Multi-Header Converter
//!
//! Converts one fixed-layout report workbook (meta fields on top, a two-row
//! merged header with Russian labels, then a data table) into a clean workbook
//! with two sheets:
//!
//! - **Data (EN)**: the data table under a translated two-level header
//! - **Descriptions (EN)**: the preamble fields and the header explanation row
//!   as `Field` / `Value / Text` pairs
//!
//! ## Pipeline
//!
//! - [`spreadsheet`]: reads the first worksheet straight from the archive parts
//!   into a dense [`Grid`], bypassing styles entirely
//! - [`layout`]: rebuilds the header, prunes columns, trims noise rows and
//!   collects descriptions
//! - [`output`]: writes the two sheets
//!
//! Everything happens in memory; the output file is written once at the end.
mod error;
mod helpers;
pub mod layout;
pub mod output;
pub mod spreadsheet;

pub use crate::error::ConvertError;
pub use crate::layout::{DataTable, DescriptionTable, Header, Layout, Translator};
pub use crate::spreadsheet::{Grid, SpreadsheetError, XlsxSpreadsheet};

use std::path::Path;
use tracing::info;

/// Settings for one conversion run.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub layout: Layout,
    pub translator: Translator,
}

/// Counts describing a finished conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Rows in the source grid
    pub source_rows: usize,
    /// Columns in the source grid
    pub source_columns: usize,
    /// Columns kept on the data sheet
    pub kept_columns: usize,
    /// Rows on the data sheet, below the header
    pub data_rows: usize,
    /// Rows on the description sheet, below its header
    pub description_rows: usize,
}

/// Builds the data and description tables from an extracted grid.
pub fn transform(grid: &Grid, options: &ConvertOptions) -> Result<(DataTable, DescriptionTable), ConvertError> {
    options.layout.validate()?;
    let header = Header::reconstruct(grid, &options.layout, &options.translator)?;
    let data = DataTable::assemble(grid, &options.layout, &header);
    let descriptions = DescriptionTable::assemble(grid, &options.layout, &options.translator)?;
    Ok((data, descriptions))
}

/// Converts the workbook at `input` and writes the result to `output`.
///
/// Nothing is written unless reading and transforming succeed.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConversionSummary, ConvertError> {
    info!(input = %input.display(), "reading workbook");
    let grid = XlsxSpreadsheet::open(input)?.read_grid()?;
    let (data, descriptions) = transform(&grid, options)?;

    info!(output = %output.display(), "writing workbook");
    output::save_workbook(output, &data, &descriptions)?;

    Ok(ConversionSummary {
        source_rows: grid.height(),
        source_columns: grid.width(),
        kept_columns: data.width(),
        data_rows: data.rows.len(),
        description_rows: descriptions.len(),
    })
}
