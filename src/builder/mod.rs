//! # Catalog builders
//!
//! Mutable staging objects populated during parsing. The parser only calls
//! `add_*`/`set_*` on them; turning them into immutable catalog entities is
//! left to the caller.
//!
//! Ownership is unique: each parser unit owns its own builder and hands it to
//! the parent builder when its element is complete.
//!
//! ```text
//! CatalogBuilder
//! ├── ServiceBuilder* (nested ServiceBuilder*, PropertyBuilder*)
//! ├── PropertyBuilder*
//! └── DatasetNodeBuilder* (dataset | catalogRef)
//!     ├── AccessBuilder*
//!     ├── MetadataBuilder* ── ThreddsMetadataBuilder
//!     ├── ThreddsMetadataBuilder (direct children)
//!     └── DatasetNodeBuilder*
//! ```

pub use catalog::{CatalogBuilder, PropertyBuilder, ServiceBuilder};
pub use dataset::{AccessBuilder, DataSizeBuilder, DatasetNodeBuilder, DatasetNodeKind, MetadataBuilder};
pub use thredds_metadata::{
    ContributorBuilder, DatePointBuilder, DateRangeBuilder, DocumentationBuilder,
    DocumentationContent, KeyphraseBuilder, ProjectNameBuilder, ThreddsMetadataBuilder,
    VariableBuilder, VariableGroupBuilder,
};

mod catalog;
mod dataset;
mod thredds_metadata;
