//! Metadata elements without children.

use super::{MetadataElement, MetadataTarget};
use crate::builder::ContributorBuilder;
use crate::issue::{IssueKind, ParseError};
use crate::names::{attributes as attr, elements, ElementName};
use crate::parser::engine::{optional_attribute, ParseContext};
use crate::vocabulary::DatePointType;

/// Consume the start tag and return the trimmed text content
fn trimmed_text(cx: &mut ParseContext<'_>, element: &ElementName) -> Result<String, ParseError> {
    cx.expect_start_element(element)?;
    Ok(cx.read_character_content(element)?.trim().to_string())
}

/// `<serviceName>`: default service of the dataset node
pub(super) struct ServiceNameParser;

impl MetadataElement for ServiceNameParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::SERVICE_NAME;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let name = trimmed_text(cx, &elements::SERVICE_NAME)?;
        if target.inheritable {
            target
                .helper
                .set_default_service_name_to_be_inherited_by_descendants(name.clone());
        }
        target.helper.set_default_service_name_specified_in_self(name);
        Ok(())
    }
}

/// `<authority>`: naming authority for dataset IDs
pub(super) struct AuthorityParser;

impl MetadataElement for AuthorityParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::AUTHORITY;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let authority = trimmed_text(cx, &elements::AUTHORITY)?;
        if target.inheritable {
            target
                .helper
                .set_id_authority_to_be_inherited_by_descendants(authority.clone());
        }
        target.helper.set_id_authority_specified_in_self(authority);
        Ok(())
    }
}

pub(super) struct DataFormatParser;

impl MetadataElement for DataFormatParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::DATA_FORMAT;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let format = trimmed_text(cx, &elements::DATA_FORMAT)?;
        target.metadata.set_data_format(format);
        Ok(())
    }
}

pub(super) struct DataTypeParser;

impl MetadataElement for DataTypeParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::DATA_TYPE;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let data_type = trimmed_text(cx, &elements::DATA_TYPE)?;
        target.metadata.set_data_type(data_type);
        Ok(())
    }
}

/// `<date type=".." format="..">`
///
/// A repeated singular type replaces the earlier value and is reported.
pub(super) struct DateParser;

impl MetadataElement for DateParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::DATE;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::DATE)?;
        let raw_type = optional_attribute(&attrs, &attr::TYPE);
        let format = optional_attribute(&attrs, &attr::FORMAT);

        let Some(date_type) = DatePointType::from_label(raw_type.as_deref()) else {
            return Err(cx.fatal(
                IssueKind::Vocabulary,
                format!("unknown date type [{}]", raw_type.as_deref().unwrap_or_default()),
                &elements::DATE,
            ));
        };

        let date = cx.read_character_content(&elements::DATE)?.trim().to_string();
        if date_type.is_generic() {
            target.metadata.add_other_date_point(date, format, raw_type);
        } else if let Some(previous) = target.metadata.set_date_point(date_type, date, format) {
            cx.warning(
                IssueKind::Structural,
                format!("repeated {} date replaces earlier value [{}]", date_type, previous.date),
                &elements::DATE,
            );
        }
        Ok(())
    }
}

/// `<documentation>`: inline text, or an XLink reference when either
/// xlink attribute is present
pub(super) struct DocumentationParser;

impl MetadataElement for DocumentationParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::DOCUMENTATION;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::DOCUMENTATION)?;
        let doc_type = optional_attribute(&attrs, &attr::TYPE);
        let title = optional_attribute(&attrs, &attr::XLINK_TITLE);
        let href = optional_attribute(&attrs, &attr::XLINK_HREF);
        let content = cx.read_character_content(&elements::DOCUMENTATION)?;

        if title.is_none() && href.is_none() {
            target.metadata.add_documentation(doc_type, content);
        } else {
            target.metadata.add_documentation_reference(doc_type, title, href);
        }
        Ok(())
    }
}

/// `<keyword vocabulary="..">`
pub(super) struct KeyphraseParser;

impl MetadataElement for KeyphraseParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::KEYWORD;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::KEYWORD)?;
        let phrase = cx.read_character_content(&elements::KEYWORD)?;
        target
            .metadata
            .add_keyphrase(optional_attribute(&attrs, &attr::VOCABULARY), phrase.trim().to_string());
        Ok(())
    }
}

/// `<project vocabulary="..">`
pub(super) struct ProjectParser;

impl MetadataElement for ProjectParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::PROJECT;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::PROJECT)?;
        let name = cx.read_character_content(&elements::PROJECT)?;
        target
            .metadata
            .add_project_name(optional_attribute(&attrs, &attr::VOCABULARY), name.trim().to_string());
        Ok(())
    }
}

/// `<contributor role="..">name</contributor>`
pub(super) struct ContributorParser;

impl MetadataElement for ContributorParser {
    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::CONTRIBUTOR;
        NAME
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::CONTRIBUTOR)?;
        let name = cx.read_character_content(&elements::CONTRIBUTOR)?;

        let mut contributor = ContributorBuilder::new();
        contributor.set_name(name.trim().to_string());
        if let Some(role) = optional_attribute(&attrs, &attr::ROLE) {
            contributor.set_role(role);
        }
        target.metadata.add_contributor(contributor);
        Ok(())
    }
}
