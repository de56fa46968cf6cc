use crate::error::ConvertError;
use crate::layout::Header;
use crate::layout::Layout;
use crate::layout::Translator;
use crate::spreadsheet::Grid;
use tracing::debug;

/// Field name for preamble rows without a `field: value` shape
pub const NOTE_FIELD: &str = "Note";
/// Field name for the aggregated second header row
pub const EXPLANATION_FIELD: &str = "Explanation";
/// Placeholder the report uses for "no value"
const EN_DASH: &str = "–";

/// Data rows of the kept columns under a two-level header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    /// `(level-1, level-2)` label of each column
    pub header: Vec<(String, String)>,
    /// Cell text, one entry per header column
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Slices the data region, keeps the header's columns and strips leading noise rows.
    pub fn assemble(grid: &Grid, layout: &Layout, header: &Header) -> DataTable {
        let rows: Vec<Vec<String>> = grid
            .rows_from(layout.data_start_row)
            .iter()
            .map(|row| header.kept.iter().map(|&col| row[col].clone()).collect())
            .collect();
        let (rows, trimmed) = trim_leading_noise(rows);
        debug!(trimmed, rows = rows.len(), "assembled data table");

        let header = header
            .pairs()
            .into_iter()
            .map(|(level_1, level_2)| (level_1.to_owned(), level_2.to_owned()))
            .collect();
        DataTable { header, rows }
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Key/value description of the report: preamble annotations plus the explanation row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescriptionTable {
    pub entries: Vec<(String, String)>,
}

impl DescriptionTable {
    /// Collects `field: value` pairs from the first column of the preamble rows
    /// and appends the explanation built from the second header row.
    pub fn assemble(grid: &Grid, layout: &Layout, translator: &Translator) -> Result<DescriptionTable, ConvertError> {
        let mut entries: Vec<(String, String)> = (0..layout.preamble_row_count.min(grid.height()))
            .filter_map(|row| preamble_entry(grid.cell(row, 0), translator))
            .collect();
        if let Some(text) = explanation(grid.require_row(layout.header_row_2)?) {
            entries.push((EXPLANATION_FIELD.to_owned(), text));
        }
        debug!(entries = entries.len(), "assembled description table");
        Ok(DescriptionTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits one preamble cell on its first colon.
///
/// The field name is translated, the value is only trimmed. Text without a
/// colon becomes a note; blank text yields nothing.
pub fn preamble_entry(text: &str, translator: &Translator) -> Option<(String, String)> {
    match text.split_once(':') {
        Some((field, value)) => Some((translator.translate(field.trim()), value.trim().to_owned())),
        None if !text.trim().is_empty() => Some((NOTE_FIELD.to_owned(), text.trim().to_owned())),
        None => None,
    }
}

/// Joins the cells of a row with single spaces, skipping empty cells and bare
/// en-dash placeholders. The dash check is on the raw cell text, unlike the
/// header labels, which lose dashes through translation.
pub fn explanation(row: &[String]) -> Option<String> {
    let text = row
        .iter()
        .map(String::as_str)
        .filter(|cell| !cell.is_empty() && *cell != EN_DASH)
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// A row is noise when its trimmed cells concatenate to nothing or to dashes only.
pub fn is_noise_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter()
        .flat_map(|cell| cell.as_ref().trim().chars())
        .all(|character| character == '-' || character == '–')
}

/// Drops noise rows from the front only; returns the rest and the number dropped.
pub fn trim_leading_noise(rows: Vec<Vec<String>>) -> (Vec<Vec<String>>, usize) {
    let trimmed = rows.iter().take_while(|row| is_noise_row(row.as_slice())).count();
    (rows.into_iter().skip(trimmed).collect(), trimmed)
}
