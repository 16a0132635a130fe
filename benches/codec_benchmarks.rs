use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dsvxml::io::dsv::{DsvReader, DsvWriter};
use dsvxml::io::xml::{XmlEntity, XmlReader, XmlWriter};
use dsvxml::io::{StringDataSink, StringDataSource};

fn sample_dsv(rows: usize) -> String {
    let mut text = String::from("id,name,city,note\n");
    for i in 0..rows {
        text.push_str(&format!("{i},user{i},\"New, York\",\"said \"\"hi\"\"\"\n"));
    }
    text
}

fn sample_xml(items: usize) -> String {
    let mut text = String::from("<items>");
    for i in 0..items {
        text.push_str(&format!("<item id=\"{i}\" kind=\"a&amp;b\">value {i} &lt; max</item>"));
    }
    text.push_str("</items>");
    text
}

fn bench_dsv(c: &mut Criterion) {
    let data = sample_dsv(1_000);
    let mut group = c.benchmark_group("dsv");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("read_rows", |b| {
        b.iter(|| {
            let reader = DsvReader::new(StringDataSource::from(data.as_str()), b',');
            black_box(reader.filter_map(|r| r.ok()).count())
        })
    });

    group.bench_function("write_rows", |b| {
        b.iter(|| {
            let mut writer = DsvWriter::new(StringDataSink::new(), b',', false);
            for i in 0..1_000 {
                let id = i.to_string();
                let _ = writer.write_row([id.as_str(), "user", "New, York", "said \"hi\""]);
            }
            black_box(writer.into_inner().as_bytes().len())
        })
    });

    group.finish();
}

fn bench_xml(c: &mut Criterion) {
    let data = sample_xml(1_000);
    let mut group = c.benchmark_group("xml");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("read_entities", |b| {
        b.iter(|| {
            let reader = XmlReader::new(StringDataSource::from(data.as_str()));
            black_box(reader.filter_map(|e| e.ok()).count())
        })
    });

    group.bench_function("write_entities", |b| {
        b.iter(|| {
            let mut sink = StringDataSink::new();
            {
                let mut writer = XmlWriter::new(&mut sink);
                let _ = writer.write_entity(&XmlEntity::start_element("items"));
                for i in 0..1_000 {
                    let item = XmlEntity::start_element("item").with_attribute("id", i.to_string());
                    let _ = writer.write_entity(&item);
                    let _ = writer.write_entity(&XmlEntity::char_data("value < max"));
                    let _ = writer.write_entity(&XmlEntity::end_element("item"));
                }
            }
            black_box(sink.as_bytes().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_dsv, bench_xml);
criterion_main!(benches);
