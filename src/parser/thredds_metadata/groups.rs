//! Metadata elements with nested parts: creator, publisher, timeCoverage
//! and variables.

use super::{MetadataElement, MetadataTarget};
use crate::builder::{ContributorBuilder, DatePointBuilder, DateRangeBuilder, VariableBuilder, VariableGroupBuilder};
use crate::issue::{IssueKind, ParseError};
use crate::names::{attributes as attr, elements, ElementName};
use crate::parser::engine::{optional_attribute, ElementParser, ParseContext, TextElementParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PartyRole {
    Creator,
    Publisher,
}

impl PartyRole {
    fn element(self) -> &'static ElementName {
        const CREATOR: &ElementName = &elements::CREATOR;
        const PUBLISHER: &ElementName = &elements::PUBLISHER;
        match self {
            PartyRole::Creator => CREATOR,
            PartyRole::Publisher => PUBLISHER,
        }
    }
}

/// `<creator>` / `<publisher>` with `<name>` and `<contact>` parts
pub(super) struct PartyParser {
    role: PartyRole,
    party: ContributorBuilder,
}

impl PartyParser {
    pub(super) fn new(role: PartyRole) -> Self {
        Self {
            role,
            party: ContributorBuilder::new(),
        }
    }
}

impl MetadataElement for PartyParser {
    fn element_name(&self) -> &ElementName {
        self.role.element()
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let name = self.element_name().clone();
        cx.expect_start_element(&name)?;
        Ok(())
    }

    fn handle_child_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let parent = self.element_name().clone();
        let child = cx.peek_start_name(&parent)?;
        if child == elements::NAME {
            let name = TextElementParser::new(elements::NAME).parse(cx)?;
            self.party.set_name(name.text.trim().to_string());
            if let Some(vocabulary) = optional_attribute(&name.attributes, &attr::VOCABULARY) {
                self.party.set_naming_authority(vocabulary);
            }
        } else if child == elements::CONTACT {
            let contact = TextElementParser::new(elements::CONTACT).parse(cx)?;
            if let Some(email) = optional_attribute(&contact.attributes, &attr::EMAIL) {
                self.party.set_email(email);
            }
            if let Some(url) = optional_attribute(&contact.attributes, &attr::URL) {
                self.party.set_webpage(url);
            }
        } else {
            cx.skip_unrecognized(&parent)?;
        }
        Ok(())
    }

    fn post_processing_after_end_element(
        &mut self,
        _cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let party = std::mem::take(&mut self.party);
        match self.role {
            PartyRole::Creator => target.metadata.add_creator(party),
            PartyRole::Publisher => target.metadata.add_publisher(party),
        }
        Ok(())
    }
}

/// `<timeCoverage>`; at least two of start, end and duration define a range
pub(super) struct TimeCoverageParser {
    range: DateRangeBuilder,
}

impl TimeCoverageParser {
    pub(super) fn new() -> Self {
        Self {
            range: DateRangeBuilder::default(),
        }
    }
}

impl MetadataElement for TimeCoverageParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::TIME_COVERAGE;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        cx.expect_start_element(&elements::TIME_COVERAGE)?;
        Ok(())
    }

    fn handle_child_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::TIME_COVERAGE)?;
        if child == elements::START || child == elements::END {
            let part = TextElementParser::new(child.clone()).parse(cx)?;
            let point = DatePointBuilder {
                date: part.text.trim().to_string(),
                format: optional_attribute(&part.attributes, &attr::FORMAT),
                date_type: None,
            };
            if child == elements::START {
                self.range.start = Some(point);
            } else {
                self.range.end = Some(point);
            }
        } else if child == elements::DURATION {
            let part = TextElementParser::new(elements::DURATION).parse(cx)?;
            self.range.duration = Some(part.text.trim().to_string());
        } else if child == elements::RESOLUTION {
            let part = TextElementParser::new(elements::RESOLUTION).parse(cx)?;
            self.range.resolution = Some(part.text.trim().to_string());
        } else {
            cx.skip_unrecognized(&elements::TIME_COVERAGE)?;
        }
        Ok(())
    }

    fn post_processing_after_end_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        if self.range.defining_parts() < 2 {
            cx.warning(
                IssueKind::Structural,
                "time coverage needs two of start, end and duration",
                &elements::TIME_COVERAGE,
            );
        }
        target.metadata.set_temporal_coverage(std::mem::take(&mut self.range));
        Ok(())
    }
}

/// `<variables vocabulary="..">` with `<variable>` and `<variableMap>` parts
pub(super) struct VariableGroupParser {
    group: VariableGroupBuilder,
}

impl VariableGroupParser {
    pub(super) fn new() -> Self {
        Self {
            group: VariableGroupBuilder::default(),
        }
    }
}

impl MetadataElement for VariableGroupParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::VARIABLES;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::VARIABLES)?;
        self.group.vocabulary = optional_attribute(&attrs, &attr::VOCABULARY);
        self.group.vocabulary_href = optional_attribute(&attrs, &attr::XLINK_HREF);
        self.group.vocabulary_title = optional_attribute(&attrs, &attr::XLINK_TITLE);
        Ok(())
    }

    fn handle_child_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::VARIABLES)?;
        if child == elements::VARIABLE {
            let part = TextElementParser::new(elements::VARIABLE).parse(cx)?;
            self.group.add_variable(VariableBuilder {
                name: optional_attribute(&part.attributes, &attr::NAME),
                vocabulary_name: optional_attribute(&part.attributes, &attr::VOCABULARY_NAME),
                units: optional_attribute(&part.attributes, &attr::UNITS),
                description: part.text.trim().to_string(),
            });
        } else if child == elements::VARIABLE_MAP {
            let part = TextElementParser::new(elements::VARIABLE_MAP).parse(cx)?;
            self.group.variable_map_href = optional_attribute(&part.attributes, &attr::XLINK_HREF);
        } else {
            cx.skip_unrecognized(&elements::VARIABLES)?;
        }
        Ok(())
    }

    fn post_processing_after_end_element(
        &mut self,
        _cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        target.metadata.add_variable_group(std::mem::take(&mut self.group));
        Ok(())
    }
}
