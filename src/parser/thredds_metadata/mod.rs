//! The THREDDS metadata group.
//!
//! Any of thirteen elements may appear where the schema allows "THREDDS
//! metadata". [`ThreddsMetadataParser`] has no element of its own: it looks
//! at the next start tag, binds exactly one delegate from the dispatch table
//! and forwards the protocol to it.

use log::debug;

use super::dataset::DatasetNodeHelper;
use super::engine::{ElementParser, ParseContext, StrayEndPolicy};
use crate::builder::ThreddsMetadataBuilder;
use crate::issue::{IssueKind, ParseError};
use crate::names::{elements, ElementName};

use groups::{PartyParser, PartyRole, TimeCoverageParser, VariableGroupParser};
use leaves::{
    AuthorityParser, ContributorParser, DataFormatParser, DataTypeParser, DateParser, DocumentationParser,
    KeyphraseParser, ProjectParser, ServiceNameParser,
};

mod groups;
mod leaves;

#[cfg(test)]
mod tests;

/// Where metadata delegates write
pub(crate) struct MetadataTarget<'t> {
    pub metadata: &'t mut ThreddsMetadataBuilder,
    pub helper: &'t mut DatasetNodeHelper,
    /// Fixed by the container when the target is created
    pub inheritable: bool,
}

impl<'t> MetadataTarget<'t> {
    pub(crate) fn new(
        metadata: &'t mut ThreddsMetadataBuilder,
        helper: &'t mut DatasetNodeHelper,
        inheritable: bool,
    ) -> Self {
        Self {
            metadata,
            helper,
            inheritable,
        }
    }
}

/// Protocol implemented by each metadata group element
pub(super) trait MetadataElement {
    fn element_name(&self) -> &ElementName;

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError>;

    fn handle_child_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        let name = self.element_name().clone();
        cx.skip_unrecognized(&name)
    }

    fn post_processing_after_end_element(
        &mut self,
        _cx: &mut ParseContext<'_>,
        _target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        Ok(())
    }
}

/// Element kinds of the metadata group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetadataKind {
    ServiceName,
    DataFormat,
    DataType,
    Date,
    Authority,
    Documentation,
    Keyphrase,
    Project,
    Creator,
    Publisher,
    Contributor,
    TimeCoverage,
    VariableGroup,
}

/// Dispatch table, tried in order
static DISPATCH: [(ElementName, MetadataKind); 13] = [
    (elements::SERVICE_NAME, MetadataKind::ServiceName),
    (elements::DATA_FORMAT, MetadataKind::DataFormat),
    (elements::DATA_TYPE, MetadataKind::DataType),
    (elements::DATE, MetadataKind::Date),
    (elements::AUTHORITY, MetadataKind::Authority),
    (elements::DOCUMENTATION, MetadataKind::Documentation),
    (elements::KEYWORD, MetadataKind::Keyphrase),
    (elements::PROJECT, MetadataKind::Project),
    (elements::CREATOR, MetadataKind::Creator),
    (elements::PUBLISHER, MetadataKind::Publisher),
    (elements::CONTRIBUTOR, MetadataKind::Contributor),
    (elements::TIME_COVERAGE, MetadataKind::TimeCoverage),
    (elements::VARIABLES, MetadataKind::VariableGroup),
];

impl MetadataKind {
    pub(crate) fn for_element(name: &ElementName) -> Option<Self> {
        DISPATCH
            .iter()
            .find(|(element, _)| element == name)
            .map(|(_, kind)| *kind)
    }

    fn delegate(self) -> MetadataDelegate {
        match self {
            MetadataKind::ServiceName => MetadataDelegate::ServiceName(ServiceNameParser),
            MetadataKind::DataFormat => MetadataDelegate::DataFormat(DataFormatParser),
            MetadataKind::DataType => MetadataDelegate::DataType(DataTypeParser),
            MetadataKind::Date => MetadataDelegate::Date(DateParser),
            MetadataKind::Authority => MetadataDelegate::Authority(AuthorityParser),
            MetadataKind::Documentation => MetadataDelegate::Documentation(DocumentationParser),
            MetadataKind::Keyphrase => MetadataDelegate::Keyphrase(KeyphraseParser),
            MetadataKind::Project => MetadataDelegate::Project(ProjectParser),
            MetadataKind::Creator => MetadataDelegate::Creator(PartyParser::new(PartyRole::Creator)),
            MetadataKind::Publisher => MetadataDelegate::Publisher(PartyParser::new(PartyRole::Publisher)),
            MetadataKind::Contributor => MetadataDelegate::Contributor(ContributorParser),
            MetadataKind::TimeCoverage => MetadataDelegate::TimeCoverage(TimeCoverageParser::new()),
            MetadataKind::VariableGroup => MetadataDelegate::VariableGroup(VariableGroupParser::new()),
        }
    }
}

/// The bound delegate; each variant carries only its own state
enum MetadataDelegate {
    ServiceName(ServiceNameParser),
    DataFormat(DataFormatParser),
    DataType(DataTypeParser),
    Date(DateParser),
    Authority(AuthorityParser),
    Documentation(DocumentationParser),
    Keyphrase(KeyphraseParser),
    Project(ProjectParser),
    Creator(PartyParser),
    Publisher(PartyParser),
    Contributor(ContributorParser),
    TimeCoverage(TimeCoverageParser),
    VariableGroup(VariableGroupParser),
}

macro_rules! with_delegate {
    ($delegate:expr, $parser:ident => $body:expr) => {
        match $delegate {
            MetadataDelegate::ServiceName($parser) => $body,
            MetadataDelegate::DataFormat($parser) => $body,
            MetadataDelegate::DataType($parser) => $body,
            MetadataDelegate::Date($parser) => $body,
            MetadataDelegate::Authority($parser) => $body,
            MetadataDelegate::Documentation($parser) => $body,
            MetadataDelegate::Keyphrase($parser) => $body,
            MetadataDelegate::Project($parser) => $body,
            MetadataDelegate::Creator($parser) => $body,
            MetadataDelegate::Publisher($parser) => $body,
            MetadataDelegate::Contributor($parser) => $body,
            MetadataDelegate::TimeCoverage($parser) => $body,
            MetadataDelegate::VariableGroup($parser) => $body,
        }
    };
}

impl MetadataDelegate {
    fn element_name(&self) -> &ElementName {
        with_delegate!(self, p => p.element_name())
    }

    fn parse_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        with_delegate!(self, p => p.parse_start_element(cx, target))
    }

    fn handle_child_start_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        with_delegate!(self, p => p.handle_child_start_element(cx, target))
    }

    fn post_processing_after_end_element(
        &mut self,
        cx: &mut ParseContext<'_>,
        target: &mut MetadataTarget<'_>,
    ) -> Result<(), ParseError> {
        with_delegate!(self, p => p.post_processing_after_end_element(cx, target))
    }
}

fn bound(delegate: &Option<MetadataDelegate>) -> &MetadataDelegate {
    match delegate {
        Some(delegate) => delegate,
        None => panic!("internal invariant violated: THREDDS metadata delegate used before it was bound"),
    }
}

fn bound_mut(delegate: &mut Option<MetadataDelegate>) -> &mut MetadataDelegate {
    match delegate {
        Some(delegate) => delegate,
        None => panic!("internal invariant violated: THREDDS metadata delegate used before it was bound"),
    }
}

/// Composite parser for one element of the metadata group
pub(crate) struct ThreddsMetadataParser<'t> {
    target: MetadataTarget<'t>,
    delegate: Option<MetadataDelegate>,
}

impl<'t> ThreddsMetadataParser<'t> {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        MetadataKind::for_element(name).is_some()
    }

    pub(crate) fn new(target: MetadataTarget<'t>) -> Self {
        Self {
            target,
            delegate: None,
        }
    }
}

impl ElementParser for ThreddsMetadataParser<'_> {
    type Output = ();

    fn element_name(&self) -> &ElementName {
        bound(&self.delegate).element_name()
    }

    fn is_self_element(&self, name: &ElementName) -> bool {
        bound(&self.delegate).element_name() == name
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let parent = cx.innermost_element().cloned().unwrap_or(elements::METADATA);
        let child = cx.peek_start_name(&parent)?;
        let Some(kind) = MetadataKind::for_element(&child) else {
            return Err(cx.fatal(
                IssueKind::Structural,
                format!(
                    "<{}> is not a recognized THREDDS metadata child element",
                    child.local_part()
                ),
                &parent,
            ));
        };
        debug!("metadata delegate {:?} bound for <{}>", kind, child.local_part());
        let delegate = self.delegate.insert(kind.delegate());
        delegate.parse_start_element(cx, &mut self.target)
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        bound_mut(&mut self.delegate).handle_child_start_element(cx, &mut self.target)
    }

    fn post_processing_after_end_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        bound_mut(&mut self.delegate).post_processing_after_end_element(cx, &mut self.target)
    }

    fn stray_end_policy(&self) -> StrayEndPolicy {
        StrayEndPolicy::YieldToParent
    }

    fn into_self_builder(self) {
        bound(&self.delegate);
    }
}
