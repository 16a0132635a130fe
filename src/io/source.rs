//! Byte source trait and its in-memory / `std::io` implementations

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Sequential byte source with one byte of lookahead.
///
/// Readers own their source; lend one with `&mut source` to inspect it
/// after the reader is done.
pub trait DataSource {
    /// `true` once no further byte can be produced
    fn end(&mut self) -> Result<bool>;

    /// Consume and return the next byte
    fn get(&mut self) -> Result<Option<u8>>;

    /// Return the next byte without consuming it
    fn peek(&mut self) -> Result<Option<u8>>;

    /// Fill up to `buf.len()` bytes; returns the number of bytes read, `0` at end
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

impl<T: DataSource + ?Sized> DataSource for &mut T {
    fn end(&mut self) -> Result<bool> {
        (**self).end()
    }

    fn get(&mut self) -> Result<Option<u8>> {
        (**self).get()
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        (**self).peek()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn end(&mut self) -> Result<bool> {
        (**self).end()
    }

    fn get(&mut self) -> Result<Option<u8>> {
        (**self).get()
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        (**self).peek()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }
}

/// In-memory source over an owned byte buffer
#[derive(Debug, Clone, Default)]
pub struct StringDataSource {
    data: Vec<u8>,
    position: usize,
}

impl StringDataSource {
    /// Create a source over `data`
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.position..]
    }
}

impl From<&str> for StringDataSource {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StringDataSource {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl DataSource for StringDataSource {
    fn end(&mut self) -> Result<bool> {
        Ok(self.position >= self.data.len())
    }

    fn get(&mut self) -> Result<Option<u8>> {
        let byte = self.data.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.data.get(self.position).copied())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let remaining = self.remaining();
        let count = remaining.len().min(buf.len());
        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        Ok(count)
    }
}

/// Source over any `std::io::Read`, buffered for lookahead
pub struct ReaderSource<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Get the inner reader
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl ReaderSource<File> {
    /// Open a file as a byte source
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> DataSource for ReaderSource<R> {
    fn end(&mut self) -> Result<bool> {
        Ok(self.reader.fill_buf()?.is_empty())
    }

    fn get(&mut self) -> Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.reader.read(buf)?)
    }
}
