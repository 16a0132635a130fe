//! DSV row writer

use super::DsvWriterConfiguration;
use crate::error::Result;
use crate::io::sink::DataSink;
use memchr::memchr3;

/// Serializes rows to a byte sink, one sink write per row
pub struct DsvWriter<S: DataSink> {
    sink: S,
    config: DsvWriterConfiguration,
}

impl<S: DataSink> DsvWriter<S> {
    /// Create a writer joining fields with `delimiter`
    pub fn new(sink: S, delimiter: u8, quote_all: bool) -> Self {
        Self {
            sink,
            config: DsvWriterConfiguration {
                delimiter,
                quote_all,
            },
        }
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: DsvWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Write one row followed by a single `\n`.
    ///
    /// The whole line goes to the sink in one write call.
    pub fn write_row<I, F>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let mut line = Vec::new();
        for (index, field) in row.into_iter().enumerate() {
            if index > 0 {
                line.push(self.config.delimiter);
            }
            self.escape_field_into(field.as_ref().as_bytes(), &mut line);
        }
        line.push(b'\n');
        self.sink.write(&line)
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Get the inner sink
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn needs_quotes(&self, field: &[u8]) -> bool {
        self.config.quote_all || memchr3(self.config.delimiter, b'"', b'\n', field).is_some()
    }

    fn escape_field_into(&self, field: &[u8], out: &mut Vec<u8>) {
        if !self.needs_quotes(field) {
            out.extend_from_slice(field);
            return;
        }
        out.push(b'"');
        for &byte in field {
            if byte == b'"' {
                out.push(b'"');
            }
            out.push(byte);
        }
        out.push(b'"');
    }
}
