use super::*;
use crate::names::{attributes, elements, ElementName, THREDDS_NS};

const SMALL_CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- a comment -->
<catalog xmlns="http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0"
         xmlns:xlink="http://www.w3.org/1999/xlink" name="Test">
  <catalogRef xlink:href="sub.xml" xlink:title="Sub"/>
  <dataset name="a &amp; b"><![CDATA[raw <text>]]></dataset>
</catalog>"#;

fn drain<S: EventSource>(source: &mut S) -> Vec<ParseEvent> {
    let mut events = Vec::new();
    while let Some(event) = source.next_event().unwrap() {
        events.push(event);
    }
    events
}

#[test]
fn test_xml_source_resolves_namespaces() {
    let mut source = XmlEventSource::from_text(SMALL_CATALOG);
    let events: Vec<_> = drain(&mut source)
        .into_iter()
        .filter(|e| !e.is_whitespace())
        .collect();

    assert_eq!(events.len(), 7);
    match &events[0] {
        ParseEvent::StartElement { name, attributes: attrs } => {
            assert_eq!(name, &elements::CATALOG);
            assert_eq!(attrs.get(&attributes::NAME), Some("Test"));
            // xmlns declarations are not attributes
            assert_eq!(attrs.len(), 1);
        }
        other => panic!("unexpected event {:?}", other),
    }
    match &events[1] {
        ParseEvent::StartElement { name, attributes: attrs } => {
            assert_eq!(name, &elements::CATALOG_REF);
            assert_eq!(attrs.get(&attributes::XLINK_HREF), Some("sub.xml"));
            assert_eq!(attrs.get(&attributes::XLINK_TITLE), Some("Sub"));
        }
        other => panic!("unexpected event {:?}", other),
    }
    // empty element is expanded
    assert!(events[2].is_end_of(&elements::CATALOG_REF));
    match &events[3] {
        ParseEvent::StartElement { attributes: attrs, .. } => {
            assert_eq!(attrs.get(&attributes::NAME), Some("a & b"));
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(events[4], ParseEvent::characters("raw <text>"));
    assert!(events[5].is_end_of(&elements::DATASET));
    assert!(events[6].is_end_of(&elements::CATALOG));
}

#[test]
fn test_peek_is_idempotent() {
    let mut source = XmlEventSource::from_text("<a><b/></a>");
    let first = source.peek().unwrap().cloned();
    let second = source.peek().unwrap().cloned();
    assert_eq!(first, second);
    assert_eq!(source.location().event_index, 0);

    let consumed = source.next_event().unwrap();
    assert_eq!(consumed, first);
    assert_eq!(source.location().event_index, 1);
    assert!(source.peek().unwrap().unwrap().is_start_of(&ElementName::new("", "b")));
}

#[test]
fn test_unqualified_document_has_empty_namespace() {
    let mut source = XmlEventSource::from_text("<catalog/>");
    let event = source.next_event().unwrap().unwrap();
    let name = event.element_name().unwrap();
    assert_eq!(name.namespace(), "");
    assert_ne!(name.namespace(), THREDDS_NS);
}

#[test]
fn test_unbound_prefix_is_stream_error() {
    let mut source = XmlEventSource::from_text("<x:catalog/>");
    let err = source.next_event().unwrap_err();
    assert!(matches!(err, StreamError::UnboundPrefix(ref p) if p == "x"));
}

#[test]
fn test_mismatched_tags_are_stream_errors() {
    let mut source = XmlEventSource::from_text("<a></b>");
    assert!(source.next_event().is_ok());
    assert!(source.next_event().is_err());
}

#[test]
fn test_exhaustion() {
    let mut source = VecEventSource::new(vec![ParseEvent::characters("  ")]);
    assert!(source.has_next().unwrap());
    assert!(source.peek().unwrap().unwrap().is_whitespace());
    source.next_event().unwrap();
    assert!(!source.has_next().unwrap());
    assert_eq!(source.next_event().unwrap(), None);
}

#[test]
fn test_counting_source_ignores_peeks() {
    let events = vec![
        ParseEvent::start(elements::CATALOG),
        ParseEvent::end(elements::CATALOG),
    ];
    let mut source = CountingEventSource::new(VecEventSource::new(events));
    source.peek().unwrap();
    source.peek().unwrap();
    assert_eq!(source.consumed(), 0);
    drain(&mut source);
    assert_eq!(source.consumed(), 2);
}
