use crate::error::ConvertError;
use crate::error::ResultMessage;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::reference::reference_to_col;
use crate::spreadsheet::Grid;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use std::io::BufRead;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Shared string table part
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
/// First worksheet part, at its conventional location
pub const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

// XML tag names (local names, namespace prefixes are ignored)
const TAG_SHARED_STRING_ITEM: &[u8] = b"si"; // Shared string table item
const TAG_TEXT: &[u8] = b"t";                // Text content within strings
const TAG_SHEET_DATA: &[u8] = b"sheetData";  // Container of all rows
const TAG_ROW: &[u8] = b"row";               // Row in worksheet
const TAG_CELL: &[u8] = b"c";                // Cell in worksheet
const TAG_INLINE_STRING: &[u8] = b"is";      // Inline string value
const TAG_VALUE: &[u8] = b"v";               // Cell value content

/// An `.xlsx` workbook loaded fully into memory.
///
/// Only the shared string table and the first worksheet are ever read; styles,
/// workbook relationships and every other part are ignored.
pub struct XlsxSpreadsheet {
    /// File name of the spreadsheet
    pub name: String,
    /// ZIP archive containing the workbook parts
    zip: ZipArchive<Cursor<Vec<u8>>>,
}

impl XlsxSpreadsheet {
    /// Reads the whole file into memory and opens it as an archive.
    pub fn open(path: &Path) -> Result<XlsxSpreadsheet, ConvertError> {
        let name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(ConvertError::from).with_prefix(&name)?;
        Self::from_bytes(&name, bytes)
    }

    /// Opens an in-memory archive.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<XlsxSpreadsheet, ConvertError> {
        let zip = ZipArchive::new(Cursor::new(bytes))
            .map_err(ConvertError::from)
            .with_prefix(name)?;
        Ok(XlsxSpreadsheet {
            name: name.to_owned(),
            zip,
        })
    }

    /// Loads the shared string table, or an empty table when the part is absent.
    pub fn load_shared_strings(&mut self) -> Result<Vec<String>, ConvertError> {
        let shared_strings = match self.zip.xml_reader(SHARED_STRINGS_PART)? {
            Some(mut reader) => parse_shared_strings(&mut reader).with_prefix(SHARED_STRINGS_PART)?,
            None => Vec::new(),
        };
        debug!(count = shared_strings.len(), "loaded shared strings");
        Ok(shared_strings)
    }

    /// Decodes the first worksheet into a dense grid of cell text.
    ///
    /// # Errors
    /// `SpreadsheetError::FormatError` when the first worksheet part is missing.
    pub fn read_grid(&mut self) -> Result<Grid, ConvertError> {
        self.read_sheet_grid(FIRST_SHEET_PART)
    }

    /// Decodes the worksheet stored at `part` into a dense grid of cell text.
    pub fn read_sheet_grid(&mut self, part: &str) -> Result<Grid, ConvertError> {
        let shared_strings = self.load_shared_strings()?;
        let mut reader = self.zip.xml_reader(part)?
            .ok_or_else(|| SpreadsheetError::FormatError(part.to_owned()))?;
        let grid = parse_sheet(&mut reader, &shared_strings).with_prefix(part)?;
        debug!(file = %self.name, part, rows = grid.height(), width = grid.width(), "extracted grid");
        Ok(grid)
    }
}

/// Parses `<sst>` content: each `<si>` becomes one entry, its `<t>` runs concatenated.
pub(crate) fn parse_shared_strings<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Vec<String>, ConvertError> {
    let mut shared_strings = Vec::<String>::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHARED_STRING_ITEM => {
            shared_strings.push(read_string_value(reader, TAG_SHARED_STRING_ITEM, false)?);
        }
    });
    Ok(shared_strings)
}

/// Parses worksheet content into a grid.
///
/// Rows follow `<row>` element order. Each cell lands at the column decoded
/// from its `r` attribute; cells without a usable reference are skipped.
pub(crate) fn parse_sheet<R: BufRead>(reader: &mut XmlReader<R>, shared_strings: &[String]) -> Result<Grid, ConvertError> {
    let mut rows = Vec::<Vec<String>>::new();
    let mut in_sheet_data = false;
    let mut row = Vec::<(usize, String)>::new();
    let mut in_cell = false;
    let mut col = None::<usize>;
    let mut is_shared = false;
    let mut inline = None::<String>;
    let mut value = None::<String>;
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHEET_DATA => in_sheet_data = true,
        Event::End(event) if event.local_name().as_ref() == TAG_SHEET_DATA => in_sheet_data = false,
        Event::Start(event) if in_sheet_data && event.local_name().as_ref() == TAG_ROW => row.clear(),
        Event::End(event) if in_sheet_data && event.local_name().as_ref() == TAG_ROW => {
            rows.push(densify(&mut row));
        }
        Event::Start(event) if in_sheet_data && event.local_name().as_ref() == TAG_CELL => {
            in_cell = true;
            col = event.get_attribute_value("r")?
                .and_then(|reference| reference_to_col(&reference));
            is_shared = event.get_attribute_value("t")?
                .map(|kind| kind == "s")
                .unwrap_or(false);
            inline = None;
            value = None;
        }
        Event::Start(event) if in_cell && event.local_name().as_ref() == TAG_INLINE_STRING => {
            inline = Some(read_string_value(reader, TAG_INLINE_STRING, false)?);
        }
        Event::Start(event) if in_cell && event.local_name().as_ref() == TAG_VALUE => {
            value = Some(read_string_value(reader, TAG_VALUE, true)?);
        }
        Event::End(event) if in_cell && event.local_name().as_ref() == TAG_CELL => {
            in_cell = false;
            if let Some(col) = col {
                let text = match (inline.take(), value.take()) {
                    (Some(text), _) => text,
                    (None, Some(raw)) if is_shared => resolve_shared_string(raw, shared_strings),
                    (None, Some(raw)) => raw,
                    (None, None) => String::new(),
                };
                row.push((col, text));
            }
        }
    });
    Ok(Grid::from_rows(rows))
}

/// Resolves a shared string reference, falling back to the raw text when it is
/// not a plain non-negative integer inside the table.
pub(crate) fn resolve_shared_string(raw: String, shared_strings: &[String]) -> String {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return raw;
    }
    raw.parse::<usize>()
        .ok()
        .and_then(|index| shared_strings.get(index))
        .cloned()
        .unwrap_or(raw)
}

/// Turns sparse `(col, text)` pairs into a row as wide as its largest column.
/// A later cell with the same column overwrites an earlier one.
fn densify(cells: &mut Vec<(usize, String)>) -> Vec<String> {
    let width = cells.iter().map(|(col, _)| col + 1).max().unwrap_or(0);
    let mut dense = vec![String::new(); width];
    for (col, text) in cells.drain(..) {
        dense[col] = text;
    }
    dense
}

/// Reads string content up to `end_tag`.
///
/// When `is_text_content` is false only text inside `<t>` elements is kept,
/// which concatenates rich-text runs and drops their formatting.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: &[u8],
    is_text_content: bool,
) -> Result<String, ConvertError> {
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.local_name().as_ref() == end_tag => break,
        Event::Start(event) if !is_text_content && event.local_name().as_ref() == TAG_TEXT => is_text = true,
        Event::End(event) if !is_text_content && event.local_name().as_ref() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
