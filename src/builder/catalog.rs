use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use super::DatasetNodeBuilder;
use crate::vocabulary::ServiceType;

/// Root of a catalog document
#[derive(Debug, Clone, Serialize)]
pub struct CatalogBuilder {
    /// Catalog name
    pub name: Option<String>,
    /// Base URI the document was retrieved from
    pub doc_base_uri: Url,
    /// Catalog schema version
    pub version: Option<String>,
    /// Expiry time
    pub expires: Option<DateTime<Utc>>,
    /// Last modification time
    pub last_modified: Option<DateTime<Utc>>,
    /// Top-level services
    pub services: Vec<ServiceBuilder>,
    /// Top-level properties
    pub properties: Vec<PropertyBuilder>,
    /// Top-level datasets and catalog references, in document order
    pub datasets: Vec<DatasetNodeBuilder>,
}

impl CatalogBuilder {
    /// Create a catalog builder
    pub fn new(
        name: Option<String>,
        doc_base_uri: Url,
        version: Option<String>,
        expires: Option<DateTime<Utc>>,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name,
            doc_base_uri,
            version,
            expires,
            last_modified,
            services: Vec::new(),
            properties: Vec::new(),
            datasets: Vec::new(),
        }
    }

    /// Add a service
    pub fn add_service(&mut self, service: ServiceBuilder) {
        self.services.push(service);
    }

    /// Add a property
    pub fn add_property(&mut self, property: PropertyBuilder) {
        self.properties.push(property);
    }

    /// Add a dataset or catalog reference
    pub fn add_dataset(&mut self, dataset: DatasetNodeBuilder) {
        self.datasets.push(dataset);
    }

    /// Find a top-level or nested service by name
    pub fn find_service(&self, name: &str) -> Option<&ServiceBuilder> {
        self.services.iter().find_map(|s| s.find(name))
    }
}

/// A data access service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBuilder {
    /// Service name, referenced by datasets
    pub name: String,
    /// Service type
    pub service_type: ServiceType,
    /// Base URL of the service
    pub base: String,
    /// Suffix appended to dataset URLs
    pub suffix: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Service properties
    pub properties: Vec<PropertyBuilder>,
    /// Nested services (compound services)
    pub services: Vec<ServiceBuilder>,
}

impl ServiceBuilder {
    /// Create a service builder
    pub fn new(name: String, service_type: ServiceType, base: String) -> Self {
        Self {
            name,
            service_type,
            base,
            suffix: None,
            description: None,
            properties: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Set the suffix
    pub fn set_suffix(&mut self, suffix: String) {
        self.suffix = Some(suffix);
    }

    /// Set the description
    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    /// Add a property
    pub fn add_property(&mut self, property: PropertyBuilder) {
        self.properties.push(property);
    }

    /// Add a nested service
    pub fn add_service(&mut self, service: ServiceBuilder) {
        self.services.push(service);
    }

    fn find(&self, name: &str) -> Option<&ServiceBuilder> {
        if self.name == name {
            return Some(self);
        }
        self.services.iter().find_map(|s| s.find(name))
    }
}

/// A name/value property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyBuilder {
    /// Property name
    pub name: String,
    /// Property value
    pub value: Option<String>,
}

impl PropertyBuilder {
    /// Create a property
    pub fn new(name: String, value: Option<String>) -> Self {
        Self { name, value }
    }
}
