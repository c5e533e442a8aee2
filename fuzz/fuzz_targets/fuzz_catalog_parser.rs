#![no_main]

use libfuzzer_sys::fuzz_target;
use thredds_catalog::event::XmlEventSource;
use thredds_catalog::{parse_catalog, ParseOptions};

fuzz_target!(|data: &[u8]| {
    // Parsing must either succeed or fail with a ParseError; it must never panic
    let options = ParseOptions::default();
    let _ = parse_catalog(
        XmlEventSource::new(data),
        "http://fuzz.example.org/catalog.xml",
        &options,
    );

    // A shallow depth limit exercises the limit path on small inputs
    let _ = parse_catalog(
        XmlEventSource::new(data),
        "http://fuzz.example.org/catalog.xml",
        &options.clone().with_max_depth(4),
    );
});
