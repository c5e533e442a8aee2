use super::*;
use crate::builder::DocumentationContent;
use crate::event::{Attributes, ParseEvent, VecEventSource};
use crate::issue::{Issues, Severity};
use crate::names::attributes as attr;
use crate::parser::engine::ParseOptions;
use crate::vocabulary::DatePointType;

struct Outcome {
    metadata: ThreddsMetadataBuilder,
    helper: DatasetNodeHelper,
    issues: Issues,
    remaining: usize,
}

/// Run composite parsers inside an open `<dataset>` until the events run out
/// or an end tag is at the head of the stream
fn run(events: Vec<ParseEvent>, inheritable: bool) -> Result<Outcome, ParseError> {
    let mut source = VecEventSource::new(events);
    let mut metadata = ThreddsMetadataBuilder::new();
    let mut helper = DatasetNodeHelper::new();
    let issues = {
        let mut cx = ParseContext::new(&mut source, ParseOptions::default());
        cx.enter(&elements::DATASET)?;
        while matches!(cx.peek(&elements::DATASET)?, Some(ParseEvent::StartElement { .. })) {
            let target = MetadataTarget::new(&mut metadata, &mut helper, inheritable);
            ThreddsMetadataParser::new(target).parse(&mut cx)?;
        }
        cx.into_issues()
    };
    Ok(Outcome {
        metadata,
        helper,
        issues,
        remaining: source.remaining(),
    })
}

fn text_element(name: ElementName, attributes: Attributes, text: &str) -> Vec<ParseEvent> {
    vec![
        ParseEvent::start_with(name.clone(), attributes),
        ParseEvent::characters(text),
        ParseEvent::end(name),
    ]
}

#[test]
fn test_dispatch_table_covers_metadata_group() {
    let claimed = [
        elements::SERVICE_NAME,
        elements::DATA_FORMAT,
        elements::DATA_TYPE,
        elements::DATE,
        elements::AUTHORITY,
        elements::DOCUMENTATION,
        elements::KEYWORD,
        elements::PROJECT,
        elements::CREATOR,
        elements::PUBLISHER,
        elements::CONTRIBUTOR,
        elements::TIME_COVERAGE,
        elements::VARIABLES,
    ];
    for name in &claimed {
        assert!(ThreddsMetadataParser::is_mine(name), "{} not claimed", name);
    }
    assert_eq!(MetadataKind::for_element(&elements::KEYWORD), Some(MetadataKind::Keyphrase));
    assert!(!ThreddsMetadataParser::is_mine(&elements::DATASET));
    assert!(!ThreddsMetadataParser::is_mine(&elements::NAME));
    assert!(!ThreddsMetadataParser::is_mine(&ElementName::new("", "serviceName")));
}

#[test]
fn test_bound_delegate_reports_its_element() {
    for (element, kind) in DISPATCH.iter() {
        let delegate = kind.delegate();
        assert_eq!(delegate.element_name(), element);
    }
}

#[test]
fn test_service_name_in_non_inheritable_container() {
    let events = text_element(elements::SERVICE_NAME, Attributes::new(), "odap");
    let out = run(events, false).unwrap();

    assert_eq!(out.helper.default_service_name_specified_in_self(), Some("odap"));
    assert_eq!(out.helper.default_service_name_to_be_inherited_by_descendants(), None);
    assert!(out.metadata.is_empty());
    assert_eq!(out.remaining, 0);
}

#[test]
fn test_service_name_in_inheritable_container() {
    let events = text_element(elements::SERVICE_NAME, Attributes::new(), "  odap\n");
    let out = run(events, true).unwrap();

    assert_eq!(out.helper.default_service_name_specified_in_self(), Some("odap"));
    assert_eq!(out.helper.default_service_name_to_be_inherited_by_descendants(), Some("odap"));
}

#[test]
fn test_authority_slots() {
    let events = text_element(elements::AUTHORITY, Attributes::new(), "edu.ucar.unidata");
    let out = run(events.clone(), false).unwrap();
    assert_eq!(out.helper.id_authority_specified_in_self(), Some("edu.ucar.unidata"));
    assert_eq!(out.helper.id_authority_to_be_inherited_by_descendants(), None);

    let out = run(events, true).unwrap();
    assert_eq!(out.helper.id_authority_to_be_inherited_by_descendants(), Some("edu.ucar.unidata"));
}

#[test]
fn test_created_date() {
    let events = text_element(elements::DATE, Attributes::new().with(attr::TYPE, "created"), "2020-01-01");
    let out = run(events, false).unwrap();

    let created = out.metadata.date_point(DatePointType::Created).unwrap();
    assert_eq!(created.date, "2020-01-01");
    assert_eq!(created.format, None);
    assert!(out.issues.is_empty());
}

#[test]
fn test_unknown_date_type_is_fatal() {
    let events = text_element(elements::DATE, Attributes::new().with(attr::TYPE, "bogus"), "x");
    let err = run(events, false).err().unwrap();

    assert_eq!(err.kind(), IssueKind::Vocabulary);
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_repeated_date_last_write_wins_with_warning() {
    let mut events = text_element(elements::DATE, Attributes::new().with(attr::TYPE, "modified"), "2020-01-01");
    events.extend(text_element(
        elements::DATE,
        Attributes::new()
            .with(attr::TYPE, "modified")
            .with(attr::FORMAT, "yyyy-MM-dd"),
        "2021-06-30",
    ));
    let out = run(events, false).unwrap();

    let modified = out.metadata.date_point(DatePointType::Modified).unwrap();
    assert_eq!(modified.date, "2021-06-30");
    assert_eq!(modified.format.as_deref(), Some("yyyy-MM-dd"));
    assert_eq!(out.issues.count(Severity::Warning), 1);
    assert!(out.issues.as_slice()[0].message.contains("2020-01-01"));
}

#[test]
fn test_untyped_and_other_dates_are_collected() {
    let mut events = text_element(elements::DATE, Attributes::new(), "2019-01-01");
    events.extend(text_element(elements::DATE, Attributes::new().with(attr::TYPE, "other"), "2018"));
    let out = run(events, false).unwrap();

    assert_eq!(out.metadata.other_dates.len(), 2);
    assert_eq!(out.metadata.other_dates[0].date_type, None);
    assert_eq!(out.metadata.other_dates[1].date_type.as_deref(), Some("other"));
}

#[test]
fn test_documentation_modes() {
    let mut events = text_element(
        elements::DOCUMENTATION,
        Attributes::new().with(attr::TYPE, "summary"),
        " Daily model output ",
    );
    events.extend(text_element(
        elements::DOCUMENTATION,
        Attributes::new()
            .with(attr::XLINK_HREF, "http://example.com/doc.html")
            .with(attr::XLINK_TITLE, "Docs"),
        "",
    ));
    let out = run(events, false).unwrap();

    let docs = &out.metadata.documentation;
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].doc_type.as_deref(), Some("summary"));
    assert_eq!(docs[0].content, DocumentationContent::Inline(" Daily model output ".into()));
    assert_eq!(
        docs[1].content,
        DocumentationContent::Reference {
            title: Some("Docs".into()),
            href: Some("http://example.com/doc.html".into()),
        }
    );
}

#[test]
fn test_inline_documentation_keeps_layout() {
    let events = vec![
        ParseEvent::start(elements::DOCUMENTATION),
        ParseEvent::characters("\n  Line one\n"),
        ParseEvent::characters("  Line two & more\n"),
        ParseEvent::end(elements::DOCUMENTATION),
    ];
    let out = run(events, false).unwrap();
    assert_eq!(
        out.metadata.documentation[0].content,
        DocumentationContent::Inline("\n  Line one\n  Line two & more\n".into())
    );
}

#[test]
fn test_keyword_project_contributor_format_type() {
    let mut events = text_element(elements::KEYWORD, Attributes::new().with(attr::VOCABULARY, "GCMD"), "ocean");
    events.extend(text_element(elements::PROJECT, Attributes::new().with(attr::VOCABULARY, "DIF"), "NCEP"));
    events.extend(text_element(elements::CONTRIBUTOR, Attributes::new().with(attr::ROLE, "PI"), "Jane"));
    events.extend(text_element(elements::DATA_FORMAT, Attributes::new(), " NetCDF "));
    events.extend(text_element(elements::DATA_TYPE, Attributes::new(), "Grid"));
    let out = run(events, false).unwrap();

    let md = &out.metadata;
    assert_eq!(md.keyphrases[0].authority.as_deref(), Some("GCMD"));
    assert_eq!(md.keyphrases[0].phrase, "ocean");
    assert_eq!(md.projects[0].name, "NCEP");
    assert_eq!(md.contributors[0].role.as_deref(), Some("PI"));
    assert_eq!(md.contributors[0].name.as_deref(), Some("Jane"));
    assert_eq!(md.data_format.as_deref(), Some("NetCDF"));
    assert_eq!(md.data_type.as_deref(), Some("Grid"));
    assert_eq!(out.remaining, 0);
}

#[test]
fn test_creator_with_name_and_contact() {
    let mut events = vec![ParseEvent::start(elements::CREATOR), ParseEvent::characters("\n  ")];
    events.extend(text_element(
        elements::NAME,
        Attributes::new().with(attr::VOCABULARY, "DIF"),
        "UCAR/UNIDATA",
    ));
    events.push(ParseEvent::start_with(
        elements::CONTACT,
        Attributes::new()
            .with(attr::EMAIL, "support@unidata.ucar.edu")
            .with(attr::URL, "https://www.unidata.ucar.edu/"),
    ));
    events.push(ParseEvent::end(elements::CONTACT));
    events.push(ParseEvent::end(elements::CREATOR));
    let out = run(events, false).unwrap();

    let creator = &out.metadata.creators[0];
    assert_eq!(creator.name.as_deref(), Some("UCAR/UNIDATA"));
    assert_eq!(creator.naming_authority.as_deref(), Some("DIF"));
    assert_eq!(creator.email.as_deref(), Some("support@unidata.ucar.edu"));
    assert_eq!(creator.webpage.as_deref(), Some("https://www.unidata.ucar.edu/"));
    assert!(out.metadata.publishers.is_empty());
}

#[test]
fn test_time_coverage_needs_two_parts() {
    let mut events = vec![ParseEvent::start(elements::TIME_COVERAGE)];
    events.extend(text_element(elements::START, Attributes::new(), "2005-01-01"));
    events.extend(text_element(elements::RESOLUTION, Attributes::new(), "6 hours"));
    events.push(ParseEvent::end(elements::TIME_COVERAGE));
    let out = run(events, false).unwrap();

    let coverage = out.metadata.temporal_coverage.as_ref().unwrap();
    assert_eq!(coverage.start.as_ref().unwrap().date, "2005-01-01");
    assert_eq!(coverage.resolution.as_deref(), Some("6 hours"));
    assert_eq!(out.issues.count(Severity::Warning), 1);
}

#[test]
fn test_variables_group() {
    let mut events = vec![ParseEvent::start_with(
        elements::VARIABLES,
        Attributes::new().with(attr::VOCABULARY, "CF-1.0"),
    )];
    events.extend(text_element(
        elements::VARIABLE,
        Attributes::new()
            .with(attr::NAME, "wv")
            .with(attr::VOCABULARY_NAME, "Wind Speed")
            .with(attr::UNITS, "m/s"),
        "Wind Speed @ surface",
    ));
    events.push(ParseEvent::start_with(
        elements::VARIABLE_MAP,
        Attributes::new().with(attr::XLINK_HREF, "map.xml"),
    ));
    events.push(ParseEvent::end(elements::VARIABLE_MAP));
    events.push(ParseEvent::end(elements::VARIABLES));
    let out = run(events, false).unwrap();

    let group = &out.metadata.variable_groups[0];
    assert_eq!(group.vocabulary.as_deref(), Some("CF-1.0"));
    assert_eq!(group.variables[0].units.as_deref(), Some("m/s"));
    assert_eq!(group.variables[0].description, "Wind Speed @ surface");
    assert_eq!(group.variable_map_href.as_deref(), Some("map.xml"));
}

#[test]
fn test_unrecognized_element_is_fatal() {
    let events = text_element(elements::PROPERTY, Attributes::new(), "");
    let err = run(events, false).err().unwrap();

    assert_eq!(err.kind(), IssueKind::Structural);
    assert!(err.to_string().contains("not a recognized THREDDS metadata child element"));
}

#[test]
fn test_nested_element_in_text_leaf_is_fatal() {
    let events = vec![
        ParseEvent::start(elements::DATA_FORMAT),
        ParseEvent::start(elements::NAME),
        ParseEvent::end(elements::NAME),
        ParseEvent::end(elements::DATA_FORMAT),
    ];
    let err = run(events, false).err().unwrap();
    assert_eq!(err.kind(), IssueKind::Structural);
    assert!(err.to_string().contains("<name>"));
}

#[test]
fn test_stray_end_of_enclosing_element_yields() {
    let events = vec![
        ParseEvent::start(elements::CREATOR),
        ParseEvent::end(elements::DATASET),
    ];
    let out = run(events, false).unwrap();

    assert_eq!(out.issues.count(Severity::Warning), 1);
    assert_eq!(out.metadata.creators.len(), 1);
    assert_eq!(out.remaining, 1);
}

#[test]
fn test_stray_end_of_other_element_is_fatal() {
    let events = vec![
        ParseEvent::start(elements::CREATOR),
        ParseEvent::end(elements::CATALOG),
    ];
    let err = run(events, false).err().unwrap();

    let message = err.to_string();
    assert_eq!(err.kind(), IssueKind::Structural);
    assert!(message.contains("creator"));
    assert!(message.contains("catalog"));
}

#[test]
#[should_panic(expected = "before it was bound")]
fn test_unbound_delegate_panics() {
    let mut metadata = ThreddsMetadataBuilder::new();
    let mut helper = DatasetNodeHelper::new();
    let parser = ThreddsMetadataParser::new(MetadataTarget::new(&mut metadata, &mut helper, false));
    let _ = parser.element_name();
}
