//! DSV row reader

use super::{DsvReaderConfiguration, Row};
use crate::error::Result;
use crate::io::source::DataSource;
use crate::notification::{NotificationCollection, NotificationType, StreamLocation};
use log::warn;

/// Reads rows of fields from a byte source, one row per call.
///
/// `"` always toggles quote-mode and is never kept as field content, except
/// for a doubled `""` inside quote-mode, which yields one literal `"`.
/// Malformed quoting is never an error: an unterminated quote swallows the
/// rest of the input into the current field and is reported through
/// [`DsvReader::notifications`].
pub struct DsvReader<S: DataSource> {
    source: S,
    config: DsvReaderConfiguration,
    rows_read: usize,
    notifications: NotificationCollection,
}

impl<S: DataSource> DsvReader<S> {
    /// Create a reader splitting fields on `delimiter`
    pub fn new(source: S, delimiter: u8) -> Self {
        Self {
            source,
            config: DsvReaderConfiguration {
                delimiter,
                ..Default::default()
            },
            rows_read: 0,
            notifications: NotificationCollection::new(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DsvReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// `true` once the source has no more bytes
    pub fn end(&mut self) -> Result<bool> {
        self.source.end()
    }

    /// Read the next row.
    ///
    /// Returns `Ok(None)` once the source is exhausted. An empty line yields
    /// an empty row; a trailing empty field after the last delimiter is not
    /// included.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        if self.source.end()? {
            return Ok(None);
        }

        let delimiter = self.config.delimiter;
        let row_number = self.rows_read + 1;
        let mut row = Row::new();
        let mut field: Vec<u8> = Vec::new();
        let mut in_quotes = false;

        while let Some(byte) = self.source.get()? {
            match byte {
                b'\n' if !in_quotes => break,
                b'"' if in_quotes => {
                    if self.source.peek()? == Some(b'"') {
                        self.source.get()?;
                        field.push(b'"');
                    } else {
                        in_quotes = false;
                    }
                }
                b'"' => in_quotes = true,
                b if b == delimiter && !in_quotes => {
                    let value = self.decode_field(std::mem::take(&mut field), row_number);
                    row.push(value);
                }
                b => field.push(b),
            }
        }

        if in_quotes {
            warn!("DSV row {}: unterminated quote runs to end of input", row_number);
            self.notifications.notify_at(
                NotificationType::Warning,
                StreamLocation::Row(row_number),
                "unterminated quote runs to end of input",
            );
        }

        if !field.is_empty() {
            let value = self.decode_field(field, row_number);
            row.push(value);
        }

        self.rows_read = row_number;
        Ok(Some(row))
    }

    /// Notifications collected so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Get the inner source
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Decode field bytes: UTF-8 first, then the configured encoding or Latin-1
    fn decode_field(&mut self, bytes: Vec<u8>, row_number: usize) -> String {
        match String::from_utf8(bytes) {
            Ok(value) => value,
            Err(err) => {
                let bytes = err.into_bytes();
                let (value, label) = match self.config.encoding {
                    Some(enc) => {
                        let (decoded, _) = enc.decode_without_bom_handling(&bytes);
                        (decoded.into_owned(), enc.name())
                    }
                    // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                    None => (bytes.iter().map(|&b| b as char).collect(), "ISO-8859-1"),
                };
                self.notifications.notify_at(
                    NotificationType::Warning,
                    StreamLocation::Row(row_number),
                    format!("field is not valid UTF-8, decoded as {}", label),
                );
                value
            }
        }
    }
}

impl<S: DataSource> Iterator for DsvReader<S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
