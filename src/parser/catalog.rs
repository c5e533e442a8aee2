//! Catalog root, service and property parsers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use url::Url;

use super::dataset::{resolve_inheritance, DatasetNodeParser};
use super::engine::{optional_attribute, started, ElementParser, ParseContext};
use crate::builder::{CatalogBuilder, PropertyBuilder, ServiceBuilder};
use crate::event::Attributes;
use crate::issue::{IssueKind, ParseError};
use crate::names::{attributes as attr, elements, AttributeName, ElementName};
use crate::vocabulary::ServiceType;

/// Parses `<catalog>`, the document root
pub(crate) struct CatalogParser {
    builder: CatalogBuilder,
}

impl CatalogParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::CATALOG
    }

    pub(crate) fn new(doc_base_uri: Url) -> Self {
        Self {
            builder: CatalogBuilder::new(None, doc_base_uri, None, None, None),
        }
    }
}

impl ElementParser for CatalogParser {
    type Output = CatalogBuilder;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::CATALOG;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::CATALOG)?;
        self.builder.name = optional_attribute(&attrs, &attr::NAME);
        self.builder.version = optional_attribute(&attrs, &attr::VERSION);
        self.builder.expires = date_attribute(cx, &attrs, &attr::EXPIRES)?;
        self.builder.last_modified = date_attribute(cx, &attrs, &attr::LAST_MODIFIED)?;
        debug!(
            "catalog [{}] version {:?}",
            self.builder.name.as_deref().unwrap_or(""),
            self.builder.version
        );
        Ok(())
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::CATALOG)?;
        if ServiceParser::is_mine(&child) {
            let service = ServiceParser::new().parse(cx)?;
            self.builder.add_service(service);
        } else if PropertyParser::is_mine(&child) {
            let property = PropertyParser::new().parse(cx)?;
            self.builder.add_property(property);
        } else if DatasetNodeParser::is_mine(&child) {
            let dataset = DatasetNodeParser::new(child).parse(cx)?;
            self.builder.add_dataset(dataset);
        } else {
            cx.skip_unrecognized(&elements::CATALOG)?;
        }
        Ok(())
    }

    fn post_processing_after_end_element(&mut self, _cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        resolve_inheritance(&mut self.builder.datasets);
        Ok(())
    }

    fn into_self_builder(self) -> CatalogBuilder {
        self.builder
    }
}

/// Parse a catalog timestamp attribute
fn date_attribute(
    cx: &ParseContext<'_>,
    attrs: &Attributes,
    name: &AttributeName,
) -> Result<Option<DateTime<Utc>>, ParseError> {
    let Some(raw) = attrs.get(name) else {
        return Ok(None);
    };
    match parse_catalog_date(raw) {
        Some(date) => Ok(Some(date)),
        None => Err(cx.fatal(
            IssueKind::Attribute,
            format!("attribute [{}] is not a valid date [{}]", name.local_part(), raw),
            &elements::CATALOG,
        )),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) and `YYYY-MM-DD`
pub(crate) fn parse_catalog_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Parses `<service>`, including nested (compound) services
pub(crate) struct ServiceParser {
    builder: Option<ServiceBuilder>,
}

impl ServiceParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::SERVICE
    }

    pub(crate) fn new() -> Self {
        Self { builder: None }
    }
}

impl ElementParser for ServiceParser {
    type Output = ServiceBuilder;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::SERVICE;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::SERVICE)?;
        let name = cx.required_attribute(&attrs, &attr::NAME, &elements::SERVICE)?;
        let type_label = cx.required_attribute(&attrs, &attr::SERVICE_TYPE, &elements::SERVICE)?;
        let base = cx.required_attribute(&attrs, &attr::BASE, &elements::SERVICE)?;

        let service_type = ServiceType::from_label(&type_label).ok_or_else(|| {
            cx.fatal(
                IssueKind::Vocabulary,
                format!("unknown service type [{}] for service [{}]", type_label, name),
                &elements::SERVICE,
            )
        })?;

        let mut service = ServiceBuilder::new(name, service_type, base);
        if let Some(suffix) = optional_attribute(&attrs, &attr::SUFFIX) {
            service.set_suffix(suffix);
        }
        if let Some(desc) = optional_attribute(&attrs, &attr::DESC) {
            service.set_description(desc);
        }
        self.builder = Some(service);
        Ok(())
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::SERVICE)?;
        let Some(service) = self.builder.as_mut() else {
            return cx.skip_unrecognized(&elements::SERVICE);
        };
        if PropertyParser::is_mine(&child) {
            service.add_property(PropertyParser::new().parse(cx)?);
        } else if ServiceParser::is_mine(&child) {
            service.add_service(ServiceParser::new().parse(cx)?);
        } else {
            cx.skip_unrecognized(&elements::SERVICE)?;
        }
        Ok(())
    }

    fn into_self_builder(self) -> ServiceBuilder {
        started(self.builder, &elements::SERVICE)
    }
}

/// Parses `<property>`
pub(crate) struct PropertyParser {
    builder: Option<PropertyBuilder>,
}

impl PropertyParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::PROPERTY
    }

    pub(crate) fn new() -> Self {
        Self { builder: None }
    }
}

impl ElementParser for PropertyParser {
    type Output = PropertyBuilder;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::PROPERTY;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::PROPERTY)?;
        let name = cx.required_attribute(&attrs, &attr::NAME, &elements::PROPERTY)?;
        self.builder = Some(PropertyBuilder::new(name, optional_attribute(&attrs, &attr::VALUE)));
        Ok(())
    }

    fn into_self_builder(self) -> PropertyBuilder {
        started(self.builder, &elements::PROPERTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_catalog_date_formats() {
        let full = parse_catalog_date("2021-03-04T05:06:07Z").unwrap();
        assert_eq!((full.year(), full.month(), full.day()), (2021, 3, 4));
        assert_eq!(full.hour(), 5);

        let offset = parse_catalog_date("2021-03-04T05:06:07+02:00").unwrap();
        assert_eq!(offset.hour(), 3);

        let local = parse_catalog_date("2021-03-04T05:06:07").unwrap();
        assert_eq!(local.second(), 7);

        let day = parse_catalog_date(" 2021-03-04 ").unwrap();
        assert_eq!(day.hour(), 0);
    }

    #[test]
    fn test_catalog_date_rejects_garbage() {
        assert!(parse_catalog_date("yesterday").is_none());
        assert!(parse_catalog_date("2021-13-01").is_none());
        assert!(parse_catalog_date("").is_none());
    }
}
