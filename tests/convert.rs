use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use xlsx_multiheader::spreadsheet::reference::index_to_col;
use xlsx_multiheader::{convert, transform, ConvertError, ConvertOptions, Grid, SpreadsheetError, Translator, XlsxSpreadsheet};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Serialises rows as a worksheet whose text cells go through the shared string table.
fn workbook_bytes(rows: &[Vec<&str>], extra_parts: &[(&str, &str)]) -> Vec<u8> {
    let mut shared = Vec::<String>::new();
    let mut sheet_data = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        sheet_data.push_str(&format!(r#"<row r="{}">"#, row_index + 1));
        for (col_index, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let index = shared.len();
            shared.push(escape(text));
            sheet_data.push_str(&format!(
                r#"<c r="{}{}" t="s" s="3"><v>{}</v></c>"#,
                index_to_col(col_index),
                row_index + 1,
                index
            ));
        }
        sheet_data.push_str("</row>");
    }
    let shared_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="{MAIN_NS}" count="{0}" uniqueCount="{0}">{1}</sst>"#,
        shared.len(),
        shared.iter().map(|text| format!(r#"<si><t xml:space="preserve">{text}</t></si>"#)).collect::<String>()
    );
    let sheet_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{MAIN_NS}"><sheetData>{sheet_data}</sheetData></worksheet>"#
    );

    let mut parts = vec![("xl/sharedStrings.xml", shared_xml.as_str()), ("xl/worksheets/sheet1.xml", sheet_xml.as_str())];
    parts.extend_from_slice(extra_parts);
    zip_bytes(&parts)
}

fn zip_bytes(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A report shaped like the real export: 7 preamble rows, two header rows,
/// a divider row, then data.
fn report_rows<'a>(preamble: &[&'a str], header_1: &[&'a str], header_2: &[&'a str], data: &[&[&'a str]]) -> Vec<Vec<&'a str>> {
    let mut rows: Vec<Vec<&str>> = preamble.iter().map(|text| vec![*text]).collect();
    rows.resize(7, Vec::new());
    rows.push(header_1.to_vec());
    rows.push(header_2.to_vec());
    rows.push(vec!["–"; header_1.len()]);
    rows.extend(data.iter().map(|row| row.to_vec()));
    rows
}

fn read_sheet(path: &Path, part: &str) -> Grid {
    let mut spreadsheet = XlsxSpreadsheet::open(path).unwrap();
    spreadsheet.read_sheet_grid(part).unwrap()
}

#[test]
fn converts_the_reference_scenario() {
    let rows = report_rows(
        &["Period: 2025-01-01", "–"],
        &["Товары", "", "Category 1"],
        &["SKU", "Артикул", ""],
        &[&["", "", ""], &["123", "A1", "x"]],
    );
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.xlsx");
    let output = dir.path().join("output.xlsx");
    std::fs::write(&input, workbook_bytes(&rows, &[])).unwrap();

    let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(summary.source_rows, 12);
    assert_eq!(summary.source_columns, 3);
    assert_eq!(summary.kept_columns, 3);
    assert_eq!(summary.data_rows, 1);
    assert_eq!(summary.description_rows, 3);

    let data = read_sheet(&output, "xl/worksheets/sheet1.xml");
    assert_eq!(data.rows(), &[
        strings(&["", "Product", "", "Category 1"]),
        strings(&["", "SKU", "Vendor Code", ""]),
        strings(&["0", "123", "A1", "x"]),
    ]);

    let descriptions = read_sheet(&output, "xl/worksheets/sheet2.xml");
    assert_eq!(descriptions.rows(), &[
        strings(&["Field", "Value / Text"]),
        strings(&["Period", "2025-01-01"]),
        strings(&["Note", "–"]),
        strings(&["Explanation", "SKU Артикул"]),
    ]);
}

#[test]
fn grid_is_rectangular() {
    let rows = vec![vec!["a"], vec![], vec!["", "", "", "d"], vec!["", "b"]];
    let mut spreadsheet = XlsxSpreadsheet::from_bytes("memory.xlsx", workbook_bytes(&rows, &[])).unwrap();
    let grid = spreadsheet.read_grid().unwrap();
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 4);
    assert!(grid.rows().iter().all(|row| row.len() == 4));
}

#[test]
fn missing_worksheet_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.xlsx");
    let output = dir.path().join("output.xlsx");
    std::fs::write(&input, zip_bytes(&[("xl/workbook.xml", "<workbook/>")])).unwrap();

    let error = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(error, ConvertError::SpreadsheetError(SpreadsheetError::FormatError(ref part)) if part == "xl/worksheets/sheet1.xml"));
    assert_eq!(error.to_string(), "Expected 'xl/worksheets/sheet1.xml' not found in workbook");
    assert!(!output.exists());
}

#[test]
fn malformed_styles_are_ignored() {
    let rows = report_rows(&[], &["Бренд"], &["–"], &[&["Acme"]]);
    let bytes = workbook_bytes(&rows, &[("xl/styles.xml", "<styleSheet><cellXfs count=\"oops\"><xf numFmtId=")]);
    let mut spreadsheet = XlsxSpreadsheet::from_bytes("memory.xlsx", bytes).unwrap();
    let grid = spreadsheet.read_grid().unwrap();

    let (data, _) = transform(&grid, &ConvertOptions::default()).unwrap();
    assert_eq!(data.header, vec![("Brand".to_owned(), String::new())]);
    assert_eq!(data.rows, vec![strings(&["Acme"])]);
}

#[test]
fn all_noise_data_gives_an_empty_data_sheet() {
    let rows = report_rows(&[], &["Товары", "Продажи"], &["SKU", "Заказы"], &[&["–", "-"], &["", ""], &["--", "–"]]);
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.xlsx");
    let output = dir.path().join("output.xlsx");
    std::fs::write(&input, workbook_bytes(&rows, &[])).unwrap();

    let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(summary.data_rows, 0);

    let data = read_sheet(&output, "xl/worksheets/sheet1.xml");
    assert_eq!(data.rows(), &[
        strings(&["", "Product", "Sales"]),
        strings(&["", "SKU", "Orders"]),
    ]);
}

#[test]
fn embedded_noise_rows_are_kept() {
    let rows = report_rows(&[], &["Товары"], &["SKU"], &[&["–"], &["1"], &["–"], &["2"]]);
    let mut spreadsheet = XlsxSpreadsheet::from_bytes("memory.xlsx", workbook_bytes(&rows, &[])).unwrap();
    let grid = spreadsheet.read_grid().unwrap();
    let (data, _) = transform(&grid, &ConvertOptions::default()).unwrap();
    assert_eq!(data.rows, vec![strings(&["1"]), strings(&["–"]), strings(&["2"])]);
}

#[test]
fn translation_overrides_apply_to_headers_and_fields() {
    let rows = report_rows(&["Период: июль", "Выгружено из кабинета"], &["Товары", "Новая метрика"], &["SKU", ""], &[&["1", "2"]]);
    let mut spreadsheet = XlsxSpreadsheet::from_bytes("memory.xlsx", workbook_bytes(&rows, &[])).unwrap();
    let grid = spreadsheet.read_grid().unwrap();

    let options = ConvertOptions {
        translator: Translator::builtin().with_overrides([("Период", "Period"), ("Новая метрика", "New Metric")]),
        ..ConvertOptions::default()
    };
    let (data, descriptions) = transform(&grid, &options).unwrap();
    assert_eq!(data.header, vec![("Product".to_owned(), "SKU".to_owned()), ("New Metric".to_owned(), String::new())]);
    assert_eq!(descriptions.entries, vec![
        ("Period".to_owned(), "июль".to_owned()),
        ("Note".to_owned(), "Выгружено из кабинета".to_owned()),
        ("Explanation".to_owned(), "SKU".to_owned()),
    ]);
}

#[test]
fn short_sheet_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.xlsx");
    let output = dir.path().join("output.xlsx");
    std::fs::write(&input, workbook_bytes(&[vec!["Period: 2025"]], &[])).unwrap();

    let error = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(error, ConvertError::SpreadsheetError(SpreadsheetError::MissingRow { row: 7, rows: 1 })));
    assert!(!output.exists());
}
