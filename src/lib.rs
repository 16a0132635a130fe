//! # dsvxml
//!
//! Streaming readers and writers for two text formats:
//!
//! - **DSV** (delimiter-separated values, CSV being the comma case): a row
//!   tokenizer that honors `"` quoting and `""` escapes, and a row writer
//!   that quotes fields only when needed (or always, if asked to).
//! - **XML**: an entity reader that turns markup into a queue of start,
//!   end and character-data entities, and a writer that escapes output and
//!   closes any element left open.
//!
//! ## Quick Start
//!
//! ```rust
//! use dsvxml::io::dsv::{DsvReader, DsvWriter};
//! use dsvxml::io::{StringDataSink, StringDataSource};
//!
//! let mut reader = DsvReader::new(StringDataSource::from("Name,Age\nJane,20\n"), b',');
//! let header = reader.read_row()?.unwrap_or_default();
//! assert_eq!(header, vec!["Name", "Age"]);
//!
//! let mut writer = DsvWriter::new(StringDataSink::new(), b',', false);
//! writer.write_row(["Jane", "New, York"])?;
//! assert_eq!(writer.into_inner().contents(), "Jane,\"New, York\"\n");
//! # Ok::<(), dsvxml::CodecError>(())
//! ```
//!
//! ```rust
//! use dsvxml::io::xml::{XmlEntity, XmlReader, XmlWriter};
//! use dsvxml::io::{StringDataSink, StringDataSource};
//!
//! let mut reader = XmlReader::new(StringDataSource::from("<root>Hello</root>"));
//! while let Some(entity) = reader.read_entity(false)? {
//!     println!("{:?}", entity);
//! }
//!
//! let mut sink = StringDataSink::new();
//! {
//!     let mut writer = XmlWriter::new(&mut sink);
//!     writer.write_entity(&XmlEntity::start_element("a").with_attribute("k", "v"))?;
//! } // dropping the writer closes <a>
//! assert_eq!(sink.contents(), r#"<a k="v"></a>"#);
//! # Ok::<(), dsvxml::CodecError>(())
//! ```
//!
//! ## Architecture
//!
//! - `DataSource` / `DataSink` - byte stream collaborators, with in-memory
//!   and `std::io` implementations
//! - `DsvReader` / `DsvWriter` - row codec
//! - `XmlReader` / `XmlWriter` - entity codec
//! - `NotificationCollection` - non-fatal irregularities tolerated while
//!   reading or writing

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod notification;

// Re-export commonly used types
pub use error::{CodecError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType, StreamLocation};

pub use io::dsv::{DsvReaderConfiguration, DsvWriterConfiguration, Row};
pub use io::xml::{XmlEntity, XmlEntityType, XmlReaderConfiguration};
pub use io::{
    DataSink, DataSource, DsvReader, DsvWriter, ReaderSource, StringDataSink, StringDataSource,
    WriterSink, XmlReader, XmlWriter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
