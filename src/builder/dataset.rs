use serde::Serialize;

use super::{PropertyBuilder, ServiceBuilder, ThreddsMetadataBuilder};
use crate::parser::DatasetNodeHelper;

/// Whether a node is a dataset or a reference to another catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DatasetNodeKind {
    /// `<dataset>`
    Dataset,
    /// `<catalogRef>`
    CatalogRef {
        /// Referenced catalog (xlink:href)
        href: String,
    },
}

/// A dataset or catalog reference
#[derive(Debug, Clone, Serialize)]
pub struct DatasetNodeBuilder {
    /// Node kind
    pub kind: DatasetNodeKind,
    /// Dataset name, or catalogRef title
    pub name: Option<String>,
    /// `ID` attribute
    pub id: Option<String>,
    /// `urlPath` attribute
    pub url_path: Option<String>,
    /// `serviceName` attribute
    pub service_name: Option<String>,
    /// `authority` attribute
    pub authority: Option<String>,
    /// `dataType` attribute
    pub data_type: Option<String>,
    /// `collectionType` attribute
    pub collection_type: Option<String>,
    /// `harvest` attribute
    pub harvest: Option<bool>,
    /// `restrictAccess` attribute
    pub restrict_access: Option<String>,
    /// Default service resolved from self or ancestors
    pub default_service_name: Option<String>,
    /// ID authority resolved from self or ancestors
    pub id_authority: Option<String>,
    /// Services declared on the dataset
    pub services: Vec<ServiceBuilder>,
    /// Properties
    pub properties: Vec<PropertyBuilder>,
    /// Access points
    pub access: Vec<AccessBuilder>,
    /// `<metadata>` containers
    pub metadata: Vec<MetadataBuilder>,
    /// Metadata given as direct children of the node
    pub thredds_metadata: ThreddsMetadataBuilder,
    /// Nested datasets and catalog references
    pub datasets: Vec<DatasetNodeBuilder>,
    /// Service name and authority declarations, resolved once the catalog is complete
    #[serde(skip)]
    pub(crate) helper: DatasetNodeHelper,
}

impl DatasetNodeBuilder {
    /// Create a node builder
    pub fn new(kind: DatasetNodeKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            id: None,
            url_path: None,
            service_name: None,
            authority: None,
            data_type: None,
            collection_type: None,
            harvest: None,
            restrict_access: None,
            default_service_name: None,
            id_authority: None,
            services: Vec::new(),
            properties: Vec::new(),
            access: Vec::new(),
            metadata: Vec::new(),
            thredds_metadata: ThreddsMetadataBuilder::default(),
            datasets: Vec::new(),
            helper: DatasetNodeHelper::new(),
        }
    }

    /// Default service name and ID authority declarations of this node
    pub fn helper(&self) -> &DatasetNodeHelper {
        &self.helper
    }

    /// True for `<catalogRef>` nodes
    pub fn is_catalog_ref(&self) -> bool {
        matches!(self.kind, DatasetNodeKind::CatalogRef { .. })
    }

    /// Add a service
    pub fn add_service(&mut self, service: ServiceBuilder) {
        self.services.push(service);
    }

    /// Add a property
    pub fn add_property(&mut self, property: PropertyBuilder) {
        self.properties.push(property);
    }

    /// Add an access point
    pub fn add_access(&mut self, access: AccessBuilder) {
        self.access.push(access);
    }

    /// Add a metadata container
    pub fn add_metadata(&mut self, metadata: MetadataBuilder) {
        self.metadata.push(metadata);
    }

    /// Add a nested dataset or catalog reference
    pub fn add_dataset(&mut self, dataset: DatasetNodeBuilder) {
        self.datasets.push(dataset);
    }
}

/// An access point of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessBuilder {
    /// Path relative to the service base
    pub url_path: String,
    /// Service to access through
    pub service_name: Option<String>,
    /// Data format
    pub data_format: Option<String>,
    /// Size of the data
    pub data_size: Option<DataSizeBuilder>,
}

impl AccessBuilder {
    /// Create an access builder
    pub fn new(url_path: String) -> Self {
        Self {
            url_path,
            service_name: None,
            data_format: None,
            data_size: None,
        }
    }

    /// Set the data size
    pub fn set_data_size(&mut self, size: DataSizeBuilder) {
        self.data_size = Some(size);
    }
}

/// `<dataSize>` content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSizeBuilder {
    /// Numeric size
    pub value: f64,
    /// Units (bytes, Kbytes, ...)
    pub units: Option<String>,
}

/// A `<metadata>` container
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataBuilder {
    /// Whether descendants inherit the content
    pub inherited: bool,
    /// `metadataType` attribute
    pub metadata_type: Option<String>,
    /// External metadata title
    pub xlink_title: Option<String>,
    /// External metadata reference
    pub xlink_href: Option<String>,
    /// Parsed THREDDS metadata content
    pub content: ThreddsMetadataBuilder,
}

impl MetadataBuilder {
    /// Create a metadata container builder
    pub fn new(inherited: bool) -> Self {
        Self {
            inherited,
            ..Default::default()
        }
    }
}
