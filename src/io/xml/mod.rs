//! Streaming XML reading and writing
//!
//! The reader turns a byte source into a queue of [`XmlEntity`] values; the
//! writer serializes entities to a sink while tracking which elements are
//! still open, so that [`XmlWriter::flush`] can close them.

mod entity;
mod reader;
mod writer;

pub use entity::{XmlEntity, XmlEntityType};
pub use reader::{XmlReader, XmlReaderState};
pub use writer::XmlWriter;

/// Default number of bytes pulled from the source per parser refill
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Configuration for the XML reader.
#[derive(Debug, Clone)]
pub struct XmlReaderConfiguration {
    /// Bytes requested from the source per refill. Clamped to at least 1.
    ///
    /// Default: [`DEFAULT_CHUNK_SIZE`].
    pub chunk_size: usize,

    /// Drop character data that consists only of whitespace.
    ///
    /// Default: `false` (whitespace runs are delivered as
    /// [`XmlEntityType::CharData`]).
    pub skip_whitespace_text: bool,
}

impl Default for XmlReaderConfiguration {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_whitespace_text: false,
        }
    }
}
