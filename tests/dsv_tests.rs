//! Integration tests for DSV reading and writing

mod common;

use common::{read_rows, test_output_path, write_rows};
use dsvxml::io::dsv::{DsvReader, DsvWriter, Row};
use dsvxml::io::{ReaderSource, StringDataSource, WriterSink};
use dsvxml::NotificationType;

fn row(fields: &[&str]) -> Row {
    fields.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_read_two_rows_then_exhausted() {
    let mut reader = DsvReader::new(
        StringDataSource::from("Name,Age,Location\nJane,20,Davis\n"),
        b',',
    );

    assert_eq!(reader.read_row().unwrap(), Some(row(&["Name", "Age", "Location"])));
    assert_eq!(reader.read_row().unwrap(), Some(row(&["Jane", "20", "Davis"])));
    assert_eq!(reader.read_row().unwrap(), None);
    assert!(reader.end().unwrap());
}

#[test]
fn test_write_quotes_field_with_delimiter() {
    let text = write_rows(
        &[row(&["Name", "Age", "Location"]), row(&["Jane", "25", "New, York"])],
        b',',
        false,
    );
    assert_eq!(text, "Name,Age,Location\nJane,25,\"New, York\"\n");
}

#[test]
fn test_quote_all_roundtrip() {
    let rows = vec![row(&["Name", "Age"]), row(&["Jane", "25"])];
    let text = write_rows(&rows, b',', true);
    assert_eq!(text, "\"Name\",\"Age\"\n\"Jane\",\"25\"\n");
    assert_eq!(read_rows(&text, b','), rows);
}

#[test]
fn test_special_fields_roundtrip() {
    let rows = vec![
        row(&["plain", "with,comma", "with \"quotes\""]),
        row(&["multi\nline", "", "end"]),
    ];
    let text = write_rows(&rows, b',', false);
    assert_eq!(read_rows(&text, b','), rows);
}

#[test]
fn test_tab_delimited_roundtrip() {
    let rows = vec![row(&["a b", "c,d", "e\tf"])];
    let text = write_rows(&rows, b'\t', false);
    assert_eq!(text, "a b\tc,d\t\"e\tf\"\n");
    assert_eq!(read_rows(&text, b'\t'), rows);
}

#[test]
fn test_quoted_header_reads_unquoted() {
    let rows = read_rows("\"Name\",\"Age\",\"Location\"\n", b',');
    assert_eq!(rows, vec![row(&["Name", "Age", "Location"])]);
}

#[test]
fn test_unterminated_quote_reports_warning() {
    let mut reader = DsvReader::new(StringDataSource::from("ok\n\"never closed,x\n"), b',');
    let rows: Vec<Row> = reader.by_ref().map(|r| r.unwrap()).collect();
    assert_eq!(rows, vec![row(&["ok"]), row(&["never closed,x\n"])]);
    assert_eq!(reader.notifications().of_type(NotificationType::Warning).count(), 1);
}

#[test]
fn test_file_roundtrip() {
    let path = test_output_path("dsv_file_roundtrip.csv");
    let rows = vec![row(&["id", "city"]), row(&["1", "New, York"]), row(&["2", "Davis"])];

    {
        let mut writer = DsvWriter::new(WriterSink::create(&path).unwrap(), b',', false);
        for r in &rows {
            writer.write_row(r).unwrap();
        }
        writer.flush().unwrap();
    }

    let reader = DsvReader::new(ReaderSource::open(&path).unwrap(), b',');
    let read: Vec<Row> = reader.map(|r| r.unwrap()).collect();
    assert_eq!(read, rows);

    let _ = std::fs::remove_file(&path);
}
