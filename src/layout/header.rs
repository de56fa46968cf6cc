use crate::error::ConvertError;
use crate::layout::Layout;
use crate::layout::Translator;
use crate::spreadsheet::reference::index_to_col;
use crate::spreadsheet::Grid;
use tracing::debug;

/// Two-level column header rebuilt from the two header rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Translated level-1 labels for every source column, forward-filled
    pub level_1: Vec<String>,
    /// Translated level-2 labels for every source column
    pub level_2: Vec<String>,
    /// Source column indexes that survive pruning, in ascending order
    pub kept: Vec<usize>,
}

impl Header {
    /// Rebuilds the header from `layout.header_row_1` and `layout.header_row_2`
    /// and decides which columns to keep.
    pub fn reconstruct(grid: &Grid, layout: &Layout, translator: &Translator) -> Result<Header, ConvertError> {
        let level_1_raw = grid.require_row(layout.header_row_1)?;
        let level_2_raw = grid.require_row(layout.header_row_2)?;

        let level_1: Vec<String> = forward_fill(level_1_raw)
            .iter()
            .map(|label| translator.translate(label))
            .collect();
        let level_2: Vec<String> = level_2_raw
            .iter()
            .map(|label| translator.translate(label))
            .collect();

        let data_rows = grid.rows_from(layout.data_start_row);
        let kept = retain_columns(&level_1, &level_2, data_rows, 0..grid.width());
        let dropped: Vec<String> = (0..grid.width())
            .filter(|col| !kept.contains(col))
            .map(index_to_col)
            .collect();
        debug!(kept = kept.len(), ?dropped, "reconstructed header");

        Ok(Header { level_1, level_2, kept })
    }

    /// `(level-1, level-2)` label pairs of the kept columns.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.kept
            .iter()
            .map(|&col| (self.level_1[col].as_str(), self.level_2[col].as_str()))
            .collect()
    }
}

/// Fills each empty (after trim) label with the nearest non-empty label to its
/// left. Leading empty labels stay empty. Returned labels are trimmed.
pub fn forward_fill<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut last = "";
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref().trim();
            if !label.is_empty() {
                last = label;
            }
            last.to_owned()
        })
        .collect()
}

/// Keeps a column when either header label is non-empty after trimming, or
/// when any data row has non-blank text in it. Order of `columns` is preserved.
pub fn retain_columns<I>(level_1: &[String], level_2: &[String], data_rows: &[Vec<String>], columns: I) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let is_filled = |labels: &[String], col: usize| labels.get(col).is_some_and(|label| !label.trim().is_empty());
    columns
        .into_iter()
        .filter(|&col| {
            is_filled(level_1, col)
                || is_filled(level_2, col)
                || data_rows.iter().any(|row| row.get(col).is_some_and(|cell| !cell.trim().is_empty()))
        })
        .collect()
}
