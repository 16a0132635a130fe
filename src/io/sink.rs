//! Byte sink trait and its in-memory / `std::io` implementations

use crate::error::Result;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sequential byte sink
pub trait DataSink {
    /// Write the whole buffer
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Push buffered bytes to the final destination
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: DataSink + ?Sized> DataSink for &mut T {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<T: DataSink + ?Sized> DataSink for Box<T> {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// In-memory sink collecting everything written to it
#[derive(Debug, Clone, Default)]
pub struct StringDataSink {
    buffer: Vec<u8>,
}

impl StringDataSink {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Written bytes as text; invalid UTF-8 is replaced
    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl DataSink for StringDataSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(buf);
        Ok(())
    }
}

/// Sink over any `std::io::Write`
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<BufWriter<File>> {
    /// Create (or truncate) a file as a byte sink
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DataSink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.writer.write_all(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_sink_collects() {
        let mut sink = StringDataSink::new();
        sink.write(b"Name,").unwrap();
        sink.write(b"Age\n").unwrap();
        assert_eq!(sink.contents(), "Name,Age\n");
        assert_eq!(sink.as_bytes().len(), 9);
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write(b"<a/>").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.into_inner(), b"<a/>".to_vec());
    }

    #[test]
    fn test_borrowed_sink() {
        fn emit<S: DataSink>(mut sink: S) {
            sink.write(b"x").unwrap();
        }

        let mut sink = StringDataSink::new();
        emit(&mut sink);
        emit(&mut sink);
        assert_eq!(sink.into_bytes(), b"xx".to_vec());
    }
}
