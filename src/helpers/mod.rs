//! Low-level container helpers shared by the spreadsheet readers
pub(crate) mod xml;
pub(crate) mod zip;
