//! Shared test utilities for dsvxml integration tests.
//!
//! Output-path resolution and the read/write helpers every test crate
//! needs, imported via `mod common;`.

#![allow(dead_code)]

use dsvxml::io::dsv::{DsvReader, DsvWriter, Row};
use dsvxml::io::xml::{XmlEntity, XmlReader, XmlWriter};
use dsvxml::io::{StringDataSink, StringDataSource};
use std::path::PathBuf;

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

// ===========================================================================
// DSV helpers
// ===========================================================================

/// Read every row of `data`.
pub fn read_rows(data: &str, delimiter: u8) -> Vec<Row> {
    DsvReader::new(StringDataSource::from(data), delimiter)
        .collect::<dsvxml::Result<Vec<Row>>>()
        .expect("in-memory DSV read cannot fail")
}

/// Serialize `rows` and return the text.
pub fn write_rows(rows: &[Row], delimiter: u8, quote_all: bool) -> String {
    let mut writer = DsvWriter::new(StringDataSink::new(), delimiter, quote_all);
    for row in rows {
        writer.write_row(row).expect("in-memory DSV write cannot fail");
    }
    writer.into_inner().contents().into_owned()
}

// ===========================================================================
// XML helpers
// ===========================================================================

/// Read every entity of `xml`, panicking on a parse error.
pub fn read_entities(xml: &str, skip_cdata: bool) -> Vec<XmlEntity> {
    let mut reader = XmlReader::new(StringDataSource::from(xml));
    let mut entities = Vec::new();
    while let Some(entity) = reader.read_entity(skip_cdata).expect("well-formed XML") {
        entities.push(entity);
    }
    entities
}

/// Serialize `entities` (closing anything left open) and return the text.
pub fn write_entities(entities: &[XmlEntity]) -> String {
    let mut sink = StringDataSink::new();
    {
        let mut writer = XmlWriter::new(&mut sink);
        for entity in entities {
            writer.write_entity(entity).expect("valid entity");
        }
    }
    sink.contents().into_owned()
}
