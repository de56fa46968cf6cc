//! Output side: the clean two-sheet workbook.
pub mod writer;

pub use writer::{build_workbook, save_workbook, DATA_SHEET_NAME, DESCRIPTION_SHEET_NAME};
