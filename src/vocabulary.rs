//! # Controlled vocabularies
//!
//! Closed enumerations used by the catalog schema. Values outside these
//! sets are reported as vocabulary errors by the parsers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Service types a `<service>` element may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// ADDE
    Adde,
    /// THREDDS catalog
    Catalog,
    /// CDM remote
    CdmRemote,
    /// CDM remote feature
    CdmrFeature,
    /// Compound (container of nested services)
    Compound,
    /// DAP4
    Dap4,
    /// DODS (legacy OPeNDAP)
    Dods,
    /// Local file
    File,
    /// FTP
    Ftp,
    /// GridFTP
    GridFtp,
    /// Plain HTTP file server
    HttpServer,
    /// ISO metadata
    Iso,
    /// Live Access Server
    Las,
    /// NcML
    NcMl,
    /// NetCDF server
    NetcdfServer,
    /// NetCDF subset service
    NetcdfSubset,
    /// OPeNDAP
    Opendap,
    /// OPeNDAP-G
    OpendapG,
    /// Resolver
    Resolver,
    /// UDDC
    Uddc,
    /// OGC Web Coverage Service
    Wcs,
    /// OGC Web Feature Service
    Wfs,
    /// OGC Web Map Service
    Wms,
    /// WSDL
    Wsdl,
}

impl ServiceType {
    const ALL: [(ServiceType, &'static str); 24] = [
        (ServiceType::Adde, "ADDE"),
        (ServiceType::Catalog, "Catalog"),
        (ServiceType::CdmRemote, "CdmRemote"),
        (ServiceType::CdmrFeature, "CdmrFeature"),
        (ServiceType::Compound, "Compound"),
        (ServiceType::Dap4, "DAP4"),
        (ServiceType::Dods, "DODS"),
        (ServiceType::File, "File"),
        (ServiceType::Ftp, "FTP"),
        (ServiceType::GridFtp, "GridFTP"),
        (ServiceType::HttpServer, "HTTPServer"),
        (ServiceType::Iso, "ISO"),
        (ServiceType::Las, "LAS"),
        (ServiceType::NcMl, "NcML"),
        (ServiceType::NetcdfServer, "NetcdfServer"),
        (ServiceType::NetcdfSubset, "NetcdfSubset"),
        (ServiceType::Opendap, "OPENDAP"),
        (ServiceType::OpendapG, "OpenDAPG"),
        (ServiceType::Resolver, "Resolver"),
        (ServiceType::Uddc, "UDDC"),
        (ServiceType::Wcs, "WCS"),
        (ServiceType::Wfs, "WFS"),
        (ServiceType::Wms, "WMS"),
        (ServiceType::Wsdl, "WSDL"),
    ];

    /// Resolve a `serviceType` attribute value, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(label))
            .map(|(t, _)| *t)
    }

    /// Canonical label
    pub fn label(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, l)| *l)
            .unwrap_or("")
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Types a `<date>` element may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePointType {
    /// created
    Created,
    /// modified
    Modified,
    /// valid
    Valid,
    /// issued
    Issued,
    /// available
    Available,
    /// metadataCreated
    MetadataCreated,
    /// metadataModified
    MetadataModified,
    /// No `type` attribute
    Untyped,
    /// other
    Other,
}

impl DatePointType {
    /// Map a `type` attribute value; `None` means the attribute was absent
    pub fn from_label(label: Option<&str>) -> Option<Self> {
        let label = match label {
            None => return Some(DatePointType::Untyped),
            Some(l) => l,
        };
        let ty = match label.to_ascii_lowercase().as_str() {
            "created" => DatePointType::Created,
            "modified" => DatePointType::Modified,
            "valid" => DatePointType::Valid,
            "issued" => DatePointType::Issued,
            "available" => DatePointType::Available,
            "metadatacreated" => DatePointType::MetadataCreated,
            "metadatamodified" => DatePointType::MetadataModified,
            "untyped" => DatePointType::Untyped,
            "other" => DatePointType::Other,
            _ => return None,
        };
        Some(ty)
    }

    /// True for the types stored in the generic "other dates" collection
    pub fn is_generic(&self) -> bool {
        matches!(self, DatePointType::Untyped | DatePointType::Other)
    }
}

impl fmt::Display for DatePointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DatePointType::Created => "created",
            DatePointType::Modified => "modified",
            DatePointType::Valid => "valid",
            DatePointType::Issued => "issued",
            DatePointType::Available => "available",
            DatePointType::MetadataCreated => "metadataCreated",
            DatePointType::MetadataModified => "metadataModified",
            DatePointType::Untyped => "untyped",
            DatePointType::Other => "other",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_ignores_case() {
        assert_eq!(ServiceType::from_label("OPENDAP"), Some(ServiceType::Opendap));
        assert_eq!(ServiceType::from_label("opendap"), Some(ServiceType::Opendap));
        assert_eq!(ServiceType::from_label("HTTPServer"), Some(ServiceType::HttpServer));
        assert_eq!(ServiceType::from_label("gopher"), None);
        assert_eq!(ServiceType::Compound.to_string(), "Compound");
    }

    #[test]
    fn test_date_point_types() {
        assert_eq!(DatePointType::from_label(None), Some(DatePointType::Untyped));
        assert_eq!(
            DatePointType::from_label(Some("metadataCreated")),
            Some(DatePointType::MetadataCreated)
        );
        assert_eq!(DatePointType::from_label(Some("bogus")), None);
        assert!(DatePointType::Other.is_generic());
        assert!(!DatePointType::Created.is_generic());
    }
}
