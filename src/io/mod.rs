//! I/O module: byte sources and sinks, DSV and XML codecs

pub mod dsv;
pub mod sink;
pub mod source;
pub mod xml;

pub use dsv::{DsvReader, DsvWriter};
pub use sink::{DataSink, StringDataSink, WriterSink};
pub use source::{DataSource, ReaderSource, StringDataSource};
pub use xml::{XmlReader, XmlWriter};
