use thiserror::Error;

/// Main error type for the converter.
/// Aggregates errors from the standard library, the archive/XML/writer dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{0}")]
    WithContextError(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    XlsxWriterError(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, ConvertError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| ConvertError::WithContextError(format!("{}: {}", message, e)))
    }
}
