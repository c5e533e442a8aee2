use serde::Serialize;

use crate::vocabulary::DatePointType;

/// Descriptive metadata of a dataset node
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThreddsMetadataBuilder {
    /// Documentation entries
    pub documentation: Vec<DocumentationBuilder>,
    /// Keyphrases
    pub keyphrases: Vec<KeyphraseBuilder>,
    /// Project names
    pub projects: Vec<ProjectNameBuilder>,
    /// Creators
    pub creators: Vec<ContributorBuilder>,
    /// Publishers
    pub publishers: Vec<ContributorBuilder>,
    /// Contributors
    pub contributors: Vec<ContributorBuilder>,
    /// Created date
    pub created: Option<DatePointBuilder>,
    /// Modified date
    pub modified: Option<DatePointBuilder>,
    /// Valid date
    pub valid: Option<DatePointBuilder>,
    /// Issued date
    pub issued: Option<DatePointBuilder>,
    /// Available date
    pub available: Option<DatePointBuilder>,
    /// Metadata created date
    pub metadata_created: Option<DatePointBuilder>,
    /// Metadata modified date
    pub metadata_modified: Option<DatePointBuilder>,
    /// Untyped and "other" dates
    pub other_dates: Vec<DatePointBuilder>,
    /// Temporal coverage
    pub temporal_coverage: Option<DateRangeBuilder>,
    /// Variable groups
    pub variable_groups: Vec<VariableGroupBuilder>,
    /// Data format
    pub data_format: Option<String>,
    /// Data (feature) type
    pub data_type: Option<String>,
}

impl ThreddsMetadataBuilder {
    /// Create an empty metadata builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether anything has been set
    pub fn is_empty(&self) -> bool {
        self.documentation.is_empty()
            && self.keyphrases.is_empty()
            && self.projects.is_empty()
            && self.creators.is_empty()
            && self.publishers.is_empty()
            && self.contributors.is_empty()
            && self.created.is_none()
            && self.modified.is_none()
            && self.valid.is_none()
            && self.issued.is_none()
            && self.available.is_none()
            && self.metadata_created.is_none()
            && self.metadata_modified.is_none()
            && self.other_dates.is_empty()
            && self.temporal_coverage.is_none()
            && self.variable_groups.is_empty()
            && self.data_format.is_none()
            && self.data_type.is_none()
    }

    /// Add inline documentation
    pub fn add_documentation(&mut self, doc_type: Option<String>, content: String) {
        self.documentation.push(DocumentationBuilder {
            doc_type,
            content: DocumentationContent::Inline(content),
        });
    }

    /// Add a reference to external documentation
    pub fn add_documentation_reference(
        &mut self,
        doc_type: Option<String>,
        title: Option<String>,
        href: Option<String>,
    ) {
        self.documentation.push(DocumentationBuilder {
            doc_type,
            content: DocumentationContent::Reference { title, href },
        });
    }

    /// Add a keyphrase
    pub fn add_keyphrase(&mut self, authority: Option<String>, phrase: String) {
        self.keyphrases.push(KeyphraseBuilder { authority, phrase });
    }

    /// Add a project name
    pub fn add_project_name(&mut self, naming_authority: Option<String>, name: String) {
        self.projects.push(ProjectNameBuilder {
            naming_authority,
            name,
        });
    }

    /// Add a creator
    pub fn add_creator(&mut self, creator: ContributorBuilder) {
        self.creators.push(creator);
    }

    /// Add a publisher
    pub fn add_publisher(&mut self, publisher: ContributorBuilder) {
        self.publishers.push(publisher);
    }

    /// Add a contributor
    pub fn add_contributor(&mut self, contributor: ContributorBuilder) {
        self.contributors.push(contributor);
    }

    /// Add an untyped or "other" date point, keyed by its raw type string
    pub fn add_other_date_point(&mut self, date: String, format: Option<String>, date_type: Option<String>) {
        self.other_dates.push(DatePointBuilder {
            date,
            format,
            date_type,
        });
    }

    /// Set a singular date slot, returning the value it replaced
    ///
    /// Generic types (untyped, other) have no slot and are appended to
    /// `other_dates` instead.
    pub fn set_date_point(
        &mut self,
        ty: DatePointType,
        date: String,
        format: Option<String>,
    ) -> Option<DatePointBuilder> {
        let point = DatePointBuilder {
            date,
            format,
            date_type: Some(ty.to_string()),
        };
        match self.date_slot_mut(ty) {
            Some(slot) => slot.replace(point),
            None => {
                self.other_dates.push(point);
                None
            }
        }
    }

    /// Read a singular date slot
    pub fn date_point(&self, ty: DatePointType) -> Option<&DatePointBuilder> {
        match ty {
            DatePointType::Created => self.created.as_ref(),
            DatePointType::Modified => self.modified.as_ref(),
            DatePointType::Valid => self.valid.as_ref(),
            DatePointType::Issued => self.issued.as_ref(),
            DatePointType::Available => self.available.as_ref(),
            DatePointType::MetadataCreated => self.metadata_created.as_ref(),
            DatePointType::MetadataModified => self.metadata_modified.as_ref(),
            DatePointType::Untyped | DatePointType::Other => None,
        }
    }

    fn date_slot_mut(&mut self, ty: DatePointType) -> Option<&mut Option<DatePointBuilder>> {
        match ty {
            DatePointType::Created => Some(&mut self.created),
            DatePointType::Modified => Some(&mut self.modified),
            DatePointType::Valid => Some(&mut self.valid),
            DatePointType::Issued => Some(&mut self.issued),
            DatePointType::Available => Some(&mut self.available),
            DatePointType::MetadataCreated => Some(&mut self.metadata_created),
            DatePointType::MetadataModified => Some(&mut self.metadata_modified),
            DatePointType::Untyped | DatePointType::Other => None,
        }
    }

    /// Set the temporal coverage
    pub fn set_temporal_coverage(&mut self, coverage: DateRangeBuilder) {
        self.temporal_coverage = Some(coverage);
    }

    /// Add a variable group
    pub fn add_variable_group(&mut self, group: VariableGroupBuilder) {
        self.variable_groups.push(group);
    }

    /// Set the data format
    pub fn set_data_format(&mut self, data_format: String) {
        self.data_format = Some(data_format);
    }

    /// Set the data type
    pub fn set_data_type(&mut self, data_type: String) {
        self.data_type = Some(data_type);
    }
}

/// A creator, publisher or contributor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributorBuilder {
    /// Name
    pub name: Option<String>,
    /// Vocabulary the name comes from
    pub naming_authority: Option<String>,
    /// Role (contributors only)
    pub role: Option<String>,
    /// Contact e-mail
    pub email: Option<String>,
    /// Contact web page
    pub webpage: Option<String>,
}

impl ContributorBuilder {
    /// Create an empty contributor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Set the naming authority
    pub fn set_naming_authority(&mut self, authority: String) {
        self.naming_authority = Some(authority);
    }

    /// Set the role
    pub fn set_role(&mut self, role: String) {
        self.role = Some(role);
    }

    /// Set the e-mail address
    pub fn set_email(&mut self, email: String) {
        self.email = Some(email);
    }

    /// Set the web page
    pub fn set_webpage(&mut self, webpage: String) {
        self.webpage = Some(webpage);
    }
}

/// A date with optional format and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatePointBuilder {
    /// Date text as written in the document
    pub date: String,
    /// Date format pattern
    pub format: Option<String>,
    /// Raw type string
    pub date_type: Option<String>,
}

/// Documentation content: inline text or an external reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocumentationContent {
    /// Text given inside the element
    Inline(String),
    /// XLink reference
    Reference {
        /// xlink:title
        title: Option<String>,
        /// xlink:href
        href: Option<String>,
    },
}

/// A documentation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationBuilder {
    /// `type` attribute (summary, rights, ...)
    pub doc_type: Option<String>,
    /// Content
    pub content: DocumentationContent,
}

/// A keyphrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyphraseBuilder {
    /// Vocabulary
    pub authority: Option<String>,
    /// Phrase
    pub phrase: String,
}

/// A project name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectNameBuilder {
    /// Vocabulary
    pub naming_authority: Option<String>,
    /// Name
    pub name: String,
}

/// Temporal coverage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRangeBuilder {
    /// Start date
    pub start: Option<DatePointBuilder>,
    /// End date
    pub end: Option<DatePointBuilder>,
    /// Duration
    pub duration: Option<String>,
    /// Resolution
    pub resolution: Option<String>,
}

impl DateRangeBuilder {
    /// Number of range-defining parts (start, end, duration) present
    pub fn defining_parts(&self) -> usize {
        [self.start.is_some(), self.end.is_some(), self.duration.is_some()]
            .iter()
            .filter(|present| **present)
            .count()
    }
}

/// A group of variables sharing a vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableGroupBuilder {
    /// Vocabulary name
    pub vocabulary: Option<String>,
    /// Vocabulary reference
    pub vocabulary_href: Option<String>,
    /// Vocabulary title
    pub vocabulary_title: Option<String>,
    /// Variables
    pub variables: Vec<VariableBuilder>,
    /// External variable map reference
    pub variable_map_href: Option<String>,
}

impl VariableGroupBuilder {
    /// Add a variable
    pub fn add_variable(&mut self, variable: VariableBuilder) {
        self.variables.push(variable);
    }
}

/// A variable description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableBuilder {
    /// Variable name
    pub name: Option<String>,
    /// Name in the vocabulary
    pub vocabulary_name: Option<String>,
    /// Units
    pub units: Option<String>,
    /// Description text
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_date_point_returns_replaced_value() {
        let mut md = ThreddsMetadataBuilder::new();
        assert!(md
            .set_date_point(DatePointType::Created, "2020-01-01".into(), None)
            .is_none());
        let previous = md
            .set_date_point(DatePointType::Created, "2021-01-01".into(), None)
            .unwrap();
        assert_eq!(previous.date, "2020-01-01");
        assert_eq!(md.date_point(DatePointType::Created).unwrap().date, "2021-01-01");
    }

    #[test]
    fn test_generic_date_types_are_collected() {
        let mut md = ThreddsMetadataBuilder::new();
        md.set_date_point(DatePointType::Other, "2020".into(), None);
        md.add_other_date_point("2019".into(), None, None);
        assert_eq!(md.other_dates.len(), 2);
        assert!(md.date_point(DatePointType::Other).is_none());
        assert!(!md.is_empty());
    }

    #[test]
    fn test_date_range_parts() {
        let mut range = DateRangeBuilder::default();
        assert_eq!(range.defining_parts(), 0);
        range.duration = Some("P1D".into());
        range.resolution = Some("PT1H".into());
        assert_eq!(range.defining_parts(), 1);
    }
}
