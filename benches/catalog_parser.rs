use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use thredds_catalog::event::{ParseEvent, XmlEventSource};
use thredds_catalog::prelude::*;

const BASE: &str = "http://thredds.example.org/thredds/catalog.xml";

fn generate_test_catalog(num_datasets: usize, nested_per_dataset: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog xmlns="http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0"
         xmlns:xlink="http://www.w3.org/1999/xlink" name="bench" version="1.0.1">
  <service name="all" serviceType="Compound" base="">
    <service name="odap" serviceType="OPENDAP" base="/thredds/dodsC/"/>
    <service name="http" serviceType="HTTPServer" base="/thredds/fileServer/"/>
  </service>"#,
    );

    for i in 0..num_datasets {
        xml.push_str(&format!(
            r#"
  <dataset name="collection {i}" ID="collection-{i}">
    <metadata inherited="true">
      <serviceName>all</serviceName>
      <authority>edu.ucar.unidata</authority>
      <dataType>Grid</dataType>
      <documentation type="summary">Synthetic collection {i}</documentation>
      <date type="created">2020-01-01</date>
      <timeCoverage><start>2020-01-01</start><end>2020-12-31</end></timeCoverage>
    </metadata>"#
        ));
        for j in 0..nested_per_dataset {
            xml.push_str(&format!(
                r#"
    <dataset name="file {i}.{j}" urlPath="data/{i}/{j}.nc">
      <dataSize units="Mbytes">{j}.5</dataSize>
      <access urlPath="data/{i}/{j}.nc" serviceName="http"/>
    </dataset>"#
            ));
        }
        xml.push_str(
            r#"
  </dataset>"#,
        );
    }

    xml.push_str(
        r#"
</catalog>"#,
    );
    xml
}

fn bench_parse_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_catalog");

    for num_datasets in [10, 100, 500] {
        let nested = 20;
        let xml = Arc::new(generate_test_catalog(num_datasets, nested));

        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_datasets), &xml, |b, xml| {
            b.iter(|| {
                let parsed = parse_catalog_str(xml, BASE, &ParseOptions::default()).unwrap();
                black_box(parsed.catalog.datasets.len());
            });
        });
    }

    group.finish();
}

fn bench_event_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_event_source");

    for num_datasets in [10, 100, 500] {
        let xml = Arc::new(generate_test_catalog(num_datasets, 20));

        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_datasets), &xml, |b, xml| {
            b.iter_batched(
                || XmlEventSource::from_text(xml.as_str()),
                |mut source| {
                    let mut starts = 0usize;
                    while let Some(event) = source.next_event().unwrap() {
                        if matches!(event, ParseEvent::StartElement { .. }) {
                            starts += 1;
                        }
                    }
                    black_box(starts);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_catalog, bench_event_source);
criterion_main!(benches);
