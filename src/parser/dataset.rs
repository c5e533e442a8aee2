//! Dataset node parsers: `<dataset>`, `<catalogRef>`, `<access>` and the
//! `<metadata>` container.

use log::debug;

use super::catalog::{PropertyParser, ServiceParser};
use super::engine::{optional_attribute, started, ElementParser, ParseContext};
use super::thredds_metadata::{MetadataTarget, ThreddsMetadataParser};
use crate::builder::{AccessBuilder, DataSizeBuilder, DatasetNodeBuilder, DatasetNodeKind, MetadataBuilder};
use crate::issue::{IssueKind, ParseError};
use crate::names::{attributes as attr, elements, ElementName};

/// Values a dataset node passes down to its descendants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Inheritance {
    pub service_name: Option<String>,
    pub id_authority: Option<String>,
}

/// Per-node inheritance state for the default service name and the ID
/// authority.
///
/// Metadata leaves only write to it; the owning dataset parser reads it
/// back when the node is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetNodeHelper {
    default_service_name_specified_in_self: Option<String>,
    default_service_name_to_be_inherited: Option<String>,
    id_authority_specified_in_self: Option<String>,
    id_authority_to_be_inherited: Option<String>,
    from_ancestors: Inheritance,
}

impl DatasetNodeHelper {
    /// Create a helper with nothing inherited
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inherit_from(&mut self, from_ancestors: Inheritance) {
        self.from_ancestors = from_ancestors;
    }

    /// Record the default service name declared on this node
    pub fn set_default_service_name_specified_in_self(&mut self, name: String) {
        self.default_service_name_specified_in_self = Some(name);
    }

    /// Record the default service name descendants inherit
    pub fn set_default_service_name_to_be_inherited_by_descendants(&mut self, name: String) {
        self.default_service_name_to_be_inherited = Some(name);
    }

    /// Record the ID authority declared on this node
    pub fn set_id_authority_specified_in_self(&mut self, authority: String) {
        self.id_authority_specified_in_self = Some(authority);
    }

    /// Record the ID authority descendants inherit
    pub fn set_id_authority_to_be_inherited_by_descendants(&mut self, authority: String) {
        self.id_authority_to_be_inherited = Some(authority);
    }

    /// Default service name declared on this node
    pub fn default_service_name_specified_in_self(&self) -> Option<&str> {
        self.default_service_name_specified_in_self.as_deref()
    }

    /// Default service name declared for descendants
    pub fn default_service_name_to_be_inherited_by_descendants(&self) -> Option<&str> {
        self.default_service_name_to_be_inherited.as_deref()
    }

    /// ID authority declared on this node
    pub fn id_authority_specified_in_self(&self) -> Option<&str> {
        self.id_authority_specified_in_self.as_deref()
    }

    /// ID authority declared for descendants
    pub fn id_authority_to_be_inherited_by_descendants(&self) -> Option<&str> {
        self.id_authority_to_be_inherited.as_deref()
    }

    /// Effective default service name: own value, else the nearest ancestor's
    pub fn default_service_name(&self) -> Option<&str> {
        self.default_service_name_specified_in_self
            .as_deref()
            .or(self.from_ancestors.service_name.as_deref())
    }

    /// Effective ID authority: own value, else the nearest ancestor's
    pub fn id_authority(&self) -> Option<&str> {
        self.id_authority_specified_in_self
            .as_deref()
            .or(self.from_ancestors.id_authority.as_deref())
    }

    pub(crate) fn inheritance_for_descendants(&self) -> Inheritance {
        Inheritance {
            service_name: self
                .default_service_name_to_be_inherited
                .clone()
                .or_else(|| self.from_ancestors.service_name.clone()),
            id_authority: self
                .id_authority_to_be_inherited
                .clone()
                .or_else(|| self.from_ancestors.id_authority.clone()),
        }
    }
}

/// Parses `<dataset>` and `<catalogRef>`
pub(crate) struct DatasetNodeParser {
    name: ElementName,
    builder: DatasetNodeBuilder,
}

impl DatasetNodeParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::DATASET || *name == elements::CATALOG_REF
    }

    /// `element` must be one the factory claimed
    pub(crate) fn new(element: ElementName) -> Self {
        Self {
            name: element,
            builder: DatasetNodeBuilder::new(DatasetNodeKind::Dataset, None),
        }
    }

    fn is_catalog_ref(&self) -> bool {
        self.name == elements::CATALOG_REF
    }
}

impl ElementParser for DatasetNodeParser {
    type Output = DatasetNodeBuilder;

    fn element_name(&self) -> &ElementName {
        &self.name
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&self.name)?;

        if self.is_catalog_ref() {
            let href = cx.required_attribute(&attrs, &attr::XLINK_HREF, &self.name)?;
            self.builder.kind = DatasetNodeKind::CatalogRef { href };
            self.builder.name =
                optional_attribute(&attrs, &attr::XLINK_TITLE).or_else(|| optional_attribute(&attrs, &attr::NAME));
        } else {
            self.builder.name = Some(cx.required_attribute(&attrs, &attr::NAME, &self.name)?);
        }

        let node = &mut self.builder;
        node.id = optional_attribute(&attrs, &attr::ID);
        node.url_path = optional_attribute(&attrs, &attr::URL_PATH);
        node.service_name = optional_attribute(&attrs, &attr::SERVICE_NAME);
        node.authority = optional_attribute(&attrs, &attr::AUTHORITY);
        node.data_type = optional_attribute(&attrs, &attr::DATA_TYPE);
        node.collection_type = optional_attribute(&attrs, &attr::COLLECTION_TYPE);
        node.restrict_access = optional_attribute(&attrs, &attr::RESTRICT_ACCESS);
        node.harvest = cx.boolean_attribute(&attrs, &attr::HARVEST, &self.name)?;

        if let Some(service_name) = node.service_name.clone() {
            node.helper.set_default_service_name_specified_in_self(service_name);
        }
        if let Some(authority) = node.authority.clone() {
            node.helper.set_id_authority_specified_in_self(authority);
        }
        Ok(())
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&self.name)?;
        let nests_datasets = !self.is_catalog_ref();

        if PropertyParser::is_mine(&child) {
            self.builder.add_property(PropertyParser::new().parse(cx)?);
        } else if MetadataContainerParser::is_mine(&child) {
            let metadata = MetadataContainerParser::new(&mut self.builder.helper).parse(cx)?;
            self.builder.add_metadata(metadata);
        } else if ThreddsMetadataParser::is_mine(&child) {
            let target = MetadataTarget::new(&mut self.builder.thredds_metadata, &mut self.builder.helper, false);
            ThreddsMetadataParser::new(target).parse(cx)?;
        } else if nests_datasets && ServiceParser::is_mine(&child) {
            self.builder.add_service(ServiceParser::new().parse(cx)?);
        } else if nests_datasets && AccessParser::is_mine(&child) {
            self.builder.add_access(AccessParser::new().parse(cx)?);
        } else if nests_datasets && DatasetNodeParser::is_mine(&child) {
            let dataset = DatasetNodeParser::new(child).parse(cx)?;
            self.builder.add_dataset(dataset);
        } else {
            cx.skip_unrecognized(&self.name)?;
        }
        Ok(())
    }

    fn into_self_builder(self) -> DatasetNodeBuilder {
        self.builder
    }
}

/// Resolve default service names and ID authorities down a finished
/// dataset tree.
///
/// Runs after the whole catalog was read, so `<metadata inherited="true">`
/// content reaches every descendant regardless of where it appears among
/// its siblings. Each dataset with a `urlPath` and an effective default
/// service gains an access through that service.
pub(crate) fn resolve_inheritance(datasets: &mut [DatasetNodeBuilder]) {
    let mut pending: Vec<(&mut DatasetNodeBuilder, Inheritance)> = datasets
        .iter_mut()
        .map(|node| (node, Inheritance::default()))
        .collect();

    while let Some((node, from_ancestors)) = pending.pop() {
        node.helper.inherit_from(from_ancestors);
        node.default_service_name = node.helper.default_service_name().map(str::to_string);
        node.id_authority = node.helper.id_authority().map(str::to_string);
        add_default_access(node);
        debug!(
            "[{}] default service {:?}, id authority {:?}",
            node.name.as_deref().unwrap_or(""),
            node.default_service_name,
            node.id_authority
        );

        let down = node.helper.inheritance_for_descendants();
        pending.extend(node.datasets.iter_mut().map(|child| (child, down.clone())));
    }
}

/// Point service-less accesses at the default service and add the access
/// implied by the dataset's own `urlPath`
fn add_default_access(node: &mut DatasetNodeBuilder) {
    let Some(service_name) = node.default_service_name.clone() else {
        return;
    };
    for access in node.access.iter_mut().filter(|access| access.service_name.is_none()) {
        access.service_name = Some(service_name.clone());
    }
    if node.is_catalog_ref() {
        return;
    }
    let Some(url_path) = node.url_path.clone() else {
        return;
    };
    let declared = node
        .access
        .iter()
        .any(|access| access.url_path == url_path && access.service_name.as_deref() == Some(service_name.as_str()));
    if !declared {
        let mut access = AccessBuilder::new(url_path);
        access.service_name = Some(service_name);
        node.add_access(access);
    }
}

/// Parses `<access>`
pub(crate) struct AccessParser {
    builder: Option<AccessBuilder>,
}

impl AccessParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::ACCESS
    }

    pub(crate) fn new() -> Self {
        Self { builder: None }
    }
}

impl ElementParser for AccessParser {
    type Output = AccessBuilder;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::ACCESS;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::ACCESS)?;
        let mut access = AccessBuilder::new(cx.required_attribute(&attrs, &attr::URL_PATH, &elements::ACCESS)?);
        access.service_name = optional_attribute(&attrs, &attr::SERVICE_NAME);
        access.data_format = optional_attribute(&attrs, &attr::DATA_FORMAT);
        self.builder = Some(access);
        Ok(())
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::ACCESS)?;
        if !DataSizeParser::is_mine(&child) {
            return cx.skip_unrecognized(&elements::ACCESS);
        }
        let size = DataSizeParser::new().parse(cx)?;
        if let (Some(access), Some(size)) = (self.builder.as_mut(), size) {
            access.set_data_size(size);
        }
        Ok(())
    }

    fn into_self_builder(self) -> AccessBuilder {
        started(self.builder, &elements::ACCESS)
    }
}

/// Parses `<dataSize>`; an unreadable size yields no builder
pub(crate) struct DataSizeParser {
    size: Option<DataSizeBuilder>,
}

impl DataSizeParser {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::DATA_SIZE
    }

    pub(crate) fn new() -> Self {
        Self { size: None }
    }
}

impl ElementParser for DataSizeParser {
    type Output = Option<DataSizeBuilder>;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::DATA_SIZE;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::DATA_SIZE)?;
        let units = optional_attribute(&attrs, &attr::UNITS);
        let text = cx.read_character_content(&elements::DATA_SIZE)?;
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => self.size = Some(DataSizeBuilder { value, units }),
            _ => cx.error(
                IssueKind::Attribute,
                format!("data size [{}] is not a number", text.trim()),
                &elements::DATA_SIZE,
            ),
        }
        Ok(())
    }

    fn into_self_builder(self) -> Option<DataSizeBuilder> {
        self.size
    }
}

/// Parses the `<metadata>` container of a dataset node
pub(crate) struct MetadataContainerParser<'h> {
    helper: &'h mut DatasetNodeHelper,
    builder: MetadataBuilder,
}

impl<'h> MetadataContainerParser<'h> {
    pub(crate) fn is_mine(name: &ElementName) -> bool {
        *name == elements::METADATA
    }

    pub(crate) fn new(helper: &'h mut DatasetNodeHelper) -> Self {
        Self {
            helper,
            builder: MetadataBuilder::default(),
        }
    }
}

impl ElementParser for MetadataContainerParser<'_> {
    type Output = MetadataBuilder;

    fn element_name(&self) -> &ElementName {
        const NAME: &ElementName = &elements::METADATA;
        NAME
    }

    fn parse_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let attrs = cx.expect_start_element(&elements::METADATA)?;
        let inherited = cx
            .boolean_attribute(&attrs, &attr::INHERITED, &elements::METADATA)?
            .unwrap_or(false);
        self.builder = MetadataBuilder::new(inherited);
        self.builder.metadata_type = optional_attribute(&attrs, &attr::METADATA_TYPE);
        self.builder.xlink_title = optional_attribute(&attrs, &attr::XLINK_TITLE);
        self.builder.xlink_href = optional_attribute(&attrs, &attr::XLINK_HREF);
        Ok(())
    }

    fn handle_child_start_element(&mut self, cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
        let child = cx.peek_start_name(&elements::METADATA)?;
        if !ThreddsMetadataParser::is_mine(&child) {
            return cx.skip_unrecognized(&elements::METADATA);
        }
        let inheritable = self.builder.inherited;
        let target = MetadataTarget::new(&mut self.builder.content, self.helper, inheritable);
        ThreddsMetadataParser::new(target).parse(cx)
    }

    fn into_self_builder(self) -> MetadataBuilder {
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_prefers_own_value() {
        let mut helper = DatasetNodeHelper::new();
        helper.inherit_from(Inheritance {
            service_name: Some("parent".into()),
            id_authority: Some("edu.parent".into()),
        });
        assert_eq!(helper.default_service_name(), Some("parent"));
        helper.set_default_service_name_specified_in_self("own".into());
        assert_eq!(helper.default_service_name(), Some("own"));
        assert_eq!(helper.id_authority(), Some("edu.parent"));
    }

    #[test]
    fn test_helper_passes_inheritable_values_down() {
        let mut helper = DatasetNodeHelper::new();
        helper.inherit_from(Inheritance {
            service_name: Some("grandparent".into()),
            id_authority: None,
        });
        helper.set_default_service_name_specified_in_self("local-only".into());
        assert_eq!(
            helper.inheritance_for_descendants().service_name.as_deref(),
            Some("grandparent")
        );

        helper.set_default_service_name_to_be_inherited_by_descendants("shared".into());
        helper.set_id_authority_to_be_inherited_by_descendants("edu.ucar".into());
        let down = helper.inheritance_for_descendants();
        assert_eq!(down.service_name.as_deref(), Some("shared"));
        assert_eq!(down.id_authority.as_deref(), Some("edu.ucar"));
    }
}
