//! Output workbook writer: renders the data and description tables into two sheets.

use crate::error::ConvertError;
use crate::layout::DataTable;
use crate::layout::DescriptionTable;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::debug;

/// Name of the data sheet
pub const DATA_SHEET_NAME: &str = "Data (EN)";
/// Name of the description sheet
pub const DESCRIPTION_SHEET_NAME: &str = "Descriptions (EN)";
/// Column headers of the description sheet
pub const DESCRIPTION_HEADERS: [&str; 2] = ["Field", "Value / Text"];

/// Rows taken by the two-level header on the data sheet
const HEADER_ROWS: usize = 2;
const INDEX_COLUMN_WIDTH: f64 = 6.0;
const DATA_COLUMN_WIDTH: f64 = 18.0;
const FIELD_COLUMN_WIDTH: f64 = 28.0;
const VALUE_COLUMN_WIDTH: f64 = 80.0;

/// Builds the two-sheet workbook in memory.
pub fn build_workbook(data: &DataTable, descriptions: &DescriptionTable) -> Result<Workbook, ConvertError> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    write_data_sheet(workbook.add_worksheet(), data, &header_format)?;
    write_description_sheet(workbook.add_worksheet(), descriptions, &header_format)?;
    Ok(workbook)
}

/// Builds the workbook and saves it to `path` in one step.
pub fn save_workbook(path: &Path, data: &DataTable, descriptions: &DescriptionTable) -> Result<(), ConvertError> {
    let mut workbook = build_workbook(data, descriptions)?;
    workbook.save(path)?;
    debug!(path = %path.display(), "saved workbook");
    Ok(())
}

fn write_data_sheet(worksheet: &mut Worksheet, data: &DataTable, header_format: &Format) -> Result<(), ConvertError> {
    worksheet.set_name(DATA_SHEET_NAME)?;

    // index column header
    worksheet.write_blank(0, 0, header_format)?;
    worksheet.write_blank(1, 0, header_format)?;
    worksheet.set_column_width(0, INDEX_COLUMN_WIDTH)?;

    let level_1: Vec<&str> = data.header.iter().map(|(label, _)| label.as_str()).collect();
    for (start, end) in label_runs(&level_1) {
        let first_col = cast_col_num(start + 1)?;
        let last_col = cast_col_num(end + 1)?;
        if start == end {
            write_header_cell(worksheet, 0, first_col, level_1[start], header_format)?;
        } else {
            worksheet.merge_range(0, first_col, 0, last_col, level_1[start], header_format)?;
        }
    }
    for (index, (_, label)) in data.header.iter().enumerate() {
        let col = cast_col_num(index + 1)?;
        write_header_cell(worksheet, 1, col, label, header_format)?;
        worksheet.set_column_width(col, DATA_COLUMN_WIDTH)?;
    }

    for (index, cells) in data.rows.iter().enumerate() {
        let row = cast_row_num(index + HEADER_ROWS)?;
        worksheet.write_number(row, 0, index as f64)?;
        for (offset, text) in cells.iter().enumerate() {
            if !text.is_empty() {
                worksheet.write_string(row, cast_col_num(offset + 1)?, text)?;
            }
        }
    }

    worksheet.set_freeze_panes(cast_row_num(HEADER_ROWS)?, 1)?;
    Ok(())
}

fn write_description_sheet(worksheet: &mut Worksheet, descriptions: &DescriptionTable, header_format: &Format) -> Result<(), ConvertError> {
    worksheet.set_name(DESCRIPTION_SHEET_NAME)?;
    for (col, label) in DESCRIPTION_HEADERS.iter().enumerate() {
        write_header_cell(worksheet, 0, cast_col_num(col)?, label, header_format)?;
    }
    worksheet.set_column_width(0, FIELD_COLUMN_WIDTH)?;
    worksheet.set_column_width(1, VALUE_COLUMN_WIDTH)?;

    for (index, (field, value)) in descriptions.entries.iter().enumerate() {
        let row = cast_row_num(index + 1)?;
        worksheet.write_string(row, 0, field)?;
        worksheet.write_string(row, 1, value)?;
    }
    Ok(())
}

fn write_header_cell(worksheet: &mut Worksheet, row: RowNum, col: ColNum, label: &str, format: &Format) -> Result<(), ConvertError> {
    if label.is_empty() {
        worksheet.write_blank(row, col, format)?;
    } else {
        worksheet.write_string_with_format(row, col, label, format)?;
    }
    Ok(())
}

/// Inclusive `(start, end)` spans of consecutive identical labels.
/// Empty labels always form single-column spans so they are never merged.
pub(crate) fn label_runs(labels: &[&str]) -> Vec<(usize, usize)> {
    let mut runs = Vec::<(usize, usize)>::new();
    for (index, label) in labels.iter().enumerate() {
        let extends = runs
            .last()
            .is_some_and(|&(start, _)| !label.is_empty() && labels[start] == *label);
        match runs.last_mut() {
            Some(run) if extends => run.1 = index,
            _ => runs.push((index, index)),
        }
    }
    runs
}

fn cast_row_num(row: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

fn cast_col_num(col: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}
