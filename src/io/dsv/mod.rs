//! DSV (delimiter-separated values) reading and writing
//!
//! Quoting follows the usual CSV conventions: a field is quoted with `"`,
//! a literal quote inside a quoted field is written `""`, and delimiters or
//! newlines inside quotes are field content.

mod reader;
mod writer;

pub use reader::DsvReader;
pub use writer::DsvWriter;

use encoding_rs::Encoding;

/// One row of fields, in column order
pub type Row = Vec<String>;

/// Configuration for the DSV reader.
#[derive(Debug, Clone)]
pub struct DsvReaderConfiguration {
    /// Field separator. Default: `b','`.
    pub delimiter: u8,

    /// Fallback decoder for fields that are not valid UTF-8.
    ///
    /// Default: `None` (Latin-1, byte-to-char).
    pub encoding: Option<&'static Encoding>,
}

impl Default for DsvReaderConfiguration {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: None,
        }
    }
}

/// Configuration for the DSV writer.
#[derive(Debug, Clone)]
pub struct DsvWriterConfiguration {
    /// Field separator. Default: `b','`.
    pub delimiter: u8,

    /// Quote every field, not only those containing the delimiter, a quote
    /// or a newline. Default: `false`.
    pub quote_all: bool,
}

impl Default for DsvWriterConfiguration {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_all: false,
        }
    }
}
