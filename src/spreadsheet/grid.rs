use crate::spreadsheet::SpreadsheetError;

/// Dense rectangular table of cell text.
///
/// Every row has exactly `width` cells; missing cells are empty strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Builds a grid from ragged rows, right-padding each with empty strings
    /// up to the widest row.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows, width }
    }

    /// Number of columns shared by every row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Returns the row or a `MissingRow` error when the grid is too short.
    pub fn require_row(&self, row: usize) -> Result<&[String], SpreadsheetError> {
        self.row(row).ok_or(SpreadsheetError::MissingRow {
            row,
            rows: self.height(),
        })
    }

    /// Cell text at `(row, col)`, or `""` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rows from `start` (inclusive) to the end; empty when `start` is past the end.
    pub fn rows_from(&self, start: usize) -> &[Vec<String>] {
        self.rows.get(start..).unwrap_or(&[])
    }
}
