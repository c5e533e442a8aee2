//! # thredds-catalog - Streaming THREDDS Catalog Parser
//!
//! `thredds_catalog` reads THREDDS InvCatalog 1.0 documents in a single
//! pass over a namespace-aware XML event stream and produces a tree of
//! mutable builders ([`CatalogBuilder`] at the root).
//!
//! ## Key Features
//!
//! - **Event driven**: each element kind is parsed by one small unit
//!   following a fixed start / children / end protocol.
//! - **Accumulated diagnostics**: unknown elements, stray text and bad
//!   values become [`Issue`]s returned next to the result; only fatal
//!   problems abort.
//! - **Bounded**: nesting depth is limited (default 64) and a [`CancelFlag`]
//!   can stop a parse between sibling elements.
//! - **Inheritance**: default service names and ID authorities declared in
//!   `<metadata inherited="true">` flow down to descendant datasets.
//!
//! ## Quick Start
//!
//! ```rust
//! use thredds_catalog::{parse_catalog_str, ParseOptions};
//!
//! let xml = r#"<catalog xmlns="http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0"
//!                       name="Test" version="1.0.1">
//!   <service name="odap" serviceType="OPENDAP" base="/thredds/dodsC/"/>
//!   <dataset name="Sample" urlPath="sample.nc" serviceName="odap"/>
//! </catalog>"#;
//!
//! let parsed = parse_catalog_str(xml, "http://example.org/thredds/catalog.xml", &ParseOptions::default())?;
//! assert_eq!(parsed.catalog.name.as_deref(), Some("Test"));
//! assert_eq!(parsed.catalog.datasets[0].default_service_name.as_deref(), Some("odap"));
//! assert!(parsed.issues.is_empty());
//! # Ok::<(), thredds_catalog::ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`names`]: qualified element and attribute names
//! - [`event`]: the event stream abstraction and its `quick-xml` adapter
//! - [`issue`]: severities, issues, fatal errors and reports
//! - [`vocabulary`]: closed value sets (service types, date types)
//! - [`builder`]: the builder tree the parser fills in
//! - [`parser`]: element parsers and the entry points

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod event;
pub mod issue;
pub mod names;
pub mod parser;
pub mod vocabulary;

pub use builder::CatalogBuilder;
pub use issue::{Issue, IssueKind, IssueReport, Issues, ParseError, Severity};
pub use parser::{
    parse_catalog, parse_catalog_file, parse_catalog_str, CancelFlag, DatasetNodeHelper, ParseOptions,
    ParsedCatalog,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::builder::{
        AccessBuilder, CatalogBuilder, ContributorBuilder, DatasetNodeBuilder, DatasetNodeKind,
        MetadataBuilder, PropertyBuilder, ServiceBuilder, ThreddsMetadataBuilder,
    };
    pub use crate::event::{EventSource, ParseEvent, VecEventSource, XmlEventSource};
    pub use crate::issue::{Issue, IssueKind, IssueReport, Issues, ParseError, Severity};
    pub use crate::names::{attributes, elements, ElementName};
    pub use crate::parser::{
        parse_catalog, parse_catalog_file, parse_catalog_str, CancelFlag, ParseOptions, ParsedCatalog,
    };
    pub use crate::vocabulary::{DatePointType, ServiceType};
}
