//! Qualified names for THREDDS catalog elements and attributes.
//!
//! Every element kind the parser recognises is bound to a fixed
//! namespace + local-name pair. Unqualified attributes carry the empty
//! namespace.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// THREDDS InvCatalog 1.0 namespace
pub const THREDDS_NS: &str = "http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0";

/// XLink namespace
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// A (namespace, local-part) pair. Equality requires both parts to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementName {
    namespace: Cow<'static, str>,
    local: Cow<'static, str>,
}

/// Attribute names share the element name representation.
pub type AttributeName = ElementName;

impl ElementName {
    /// Create a name from owned parts
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            local: Cow::Owned(local.into()),
        }
    }

    /// A name in the THREDDS catalog namespace
    pub const fn thredds(local: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(THREDDS_NS),
            local: Cow::Borrowed(local),
        }
    }

    /// A name in the XLink namespace
    pub const fn xlink(local: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(XLINK_NS),
            local: Cow::Borrowed(local),
        }
    }

    /// A name without namespace (plain attributes)
    pub const fn unqualified(local: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(""),
            local: Cow::Borrowed(local),
        }
    }

    /// Namespace URI; empty when unqualified
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local part
    pub fn local_part(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}

/// Element names
pub mod elements {
    use super::ElementName;

    // =========================================================================
    // Catalog structure
    // =========================================================================

    /// catalog
    pub const CATALOG: ElementName = ElementName::thredds("catalog");
    /// service
    pub const SERVICE: ElementName = ElementName::thredds("service");
    /// property
    pub const PROPERTY: ElementName = ElementName::thredds("property");
    /// dataset
    pub const DATASET: ElementName = ElementName::thredds("dataset");
    /// catalogRef
    pub const CATALOG_REF: ElementName = ElementName::thredds("catalogRef");
    /// access
    pub const ACCESS: ElementName = ElementName::thredds("access");
    /// dataSize
    pub const DATA_SIZE: ElementName = ElementName::thredds("dataSize");
    /// metadata
    pub const METADATA: ElementName = ElementName::thredds("metadata");

    // =========================================================================
    // THREDDS metadata group
    // =========================================================================

    /// serviceName
    pub const SERVICE_NAME: ElementName = ElementName::thredds("serviceName");
    /// dataFormat
    pub const DATA_FORMAT: ElementName = ElementName::thredds("dataFormat");
    /// dataType
    pub const DATA_TYPE: ElementName = ElementName::thredds("dataType");
    /// date
    pub const DATE: ElementName = ElementName::thredds("date");
    /// authority
    pub const AUTHORITY: ElementName = ElementName::thredds("authority");
    /// documentation
    pub const DOCUMENTATION: ElementName = ElementName::thredds("documentation");
    /// keyword (keyphrase)
    pub const KEYWORD: ElementName = ElementName::thredds("keyword");
    /// project
    pub const PROJECT: ElementName = ElementName::thredds("project");
    /// creator
    pub const CREATOR: ElementName = ElementName::thredds("creator");
    /// publisher
    pub const PUBLISHER: ElementName = ElementName::thredds("publisher");
    /// contributor
    pub const CONTRIBUTOR: ElementName = ElementName::thredds("contributor");
    /// timeCoverage
    pub const TIME_COVERAGE: ElementName = ElementName::thredds("timeCoverage");
    /// variables (variable group)
    pub const VARIABLES: ElementName = ElementName::thredds("variables");

    // =========================================================================
    // Nested parts of metadata elements
    // =========================================================================

    /// name (inside creator/publisher)
    pub const NAME: ElementName = ElementName::thredds("name");
    /// contact (inside creator/publisher)
    pub const CONTACT: ElementName = ElementName::thredds("contact");
    /// start (inside timeCoverage)
    pub const START: ElementName = ElementName::thredds("start");
    /// end (inside timeCoverage)
    pub const END: ElementName = ElementName::thredds("end");
    /// duration (inside timeCoverage)
    pub const DURATION: ElementName = ElementName::thredds("duration");
    /// resolution (inside timeCoverage)
    pub const RESOLUTION: ElementName = ElementName::thredds("resolution");
    /// variable (inside variables)
    pub const VARIABLE: ElementName = ElementName::thredds("variable");
    /// variableMap (inside variables)
    pub const VARIABLE_MAP: ElementName = ElementName::thredds("variableMap");
}

/// Attribute names
pub mod attributes {
    use super::ElementName;

    /// name
    pub const NAME: ElementName = ElementName::unqualified("name");
    /// version
    pub const VERSION: ElementName = ElementName::unqualified("version");
    /// expires
    pub const EXPIRES: ElementName = ElementName::unqualified("expires");
    /// lastModified
    pub const LAST_MODIFIED: ElementName = ElementName::unqualified("lastModified");
    /// serviceType
    pub const SERVICE_TYPE: ElementName = ElementName::unqualified("serviceType");
    /// base
    pub const BASE: ElementName = ElementName::unqualified("base");
    /// suffix
    pub const SUFFIX: ElementName = ElementName::unqualified("suffix");
    /// desc
    pub const DESC: ElementName = ElementName::unqualified("desc");
    /// value
    pub const VALUE: ElementName = ElementName::unqualified("value");
    /// ID
    pub const ID: ElementName = ElementName::unqualified("ID");
    /// urlPath
    pub const URL_PATH: ElementName = ElementName::unqualified("urlPath");
    /// serviceName
    pub const SERVICE_NAME: ElementName = ElementName::unqualified("serviceName");
    /// authority
    pub const AUTHORITY: ElementName = ElementName::unqualified("authority");
    /// dataType
    pub const DATA_TYPE: ElementName = ElementName::unqualified("dataType");
    /// dataFormat
    pub const DATA_FORMAT: ElementName = ElementName::unqualified("dataFormat");
    /// collectionType
    pub const COLLECTION_TYPE: ElementName = ElementName::unqualified("collectionType");
    /// harvest
    pub const HARVEST: ElementName = ElementName::unqualified("harvest");
    /// restrictAccess
    pub const RESTRICT_ACCESS: ElementName = ElementName::unqualified("restrictAccess");
    /// units
    pub const UNITS: ElementName = ElementName::unqualified("units");
    /// inherited
    pub const INHERITED: ElementName = ElementName::unqualified("inherited");
    /// metadataType
    pub const METADATA_TYPE: ElementName = ElementName::unqualified("metadataType");
    /// type
    pub const TYPE: ElementName = ElementName::unqualified("type");
    /// format
    pub const FORMAT: ElementName = ElementName::unqualified("format");
    /// vocabulary
    pub const VOCABULARY: ElementName = ElementName::unqualified("vocabulary");
    /// role
    pub const ROLE: ElementName = ElementName::unqualified("role");
    /// email
    pub const EMAIL: ElementName = ElementName::unqualified("email");
    /// url
    pub const URL: ElementName = ElementName::unqualified("url");
    /// vocabulary_name
    pub const VOCABULARY_NAME: ElementName = ElementName::unqualified("vocabulary_name");

    /// xlink:href
    pub const XLINK_HREF: ElementName = ElementName::xlink("href");
    /// xlink:title
    pub const XLINK_TITLE: ElementName = ElementName::xlink("title");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_needs_both_parts() {
        let owned = ElementName::new(THREDDS_NS, "catalog");
        assert_eq!(owned, elements::CATALOG);
        assert_ne!(ElementName::new("", "catalog"), elements::CATALOG);
        assert_ne!(ElementName::new(THREDDS_NS, "dataset"), elements::CATALOG);
    }

    #[test]
    fn test_display() {
        assert_eq!(attributes::NAME.to_string(), "name");
        assert_eq!(
            attributes::XLINK_HREF.to_string(),
            "{http://www.w3.org/1999/xlink}href"
        );
    }
}
