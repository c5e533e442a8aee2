//! # Catalog parser
//!
//! Single-pass, event-driven parser turning a namespace-aware event stream
//! into a [`CatalogBuilder`] tree.
//!
//! Every element kind has one parser unit implementing the four-phase
//! protocol of the `engine` module. A parent peeks at the next start tag,
//! asks each sibling factory (`is_mine`) whether it claims it, and runs the
//! claimed child to completion before continuing. Children nobody claims are
//! skipped whole and reported as warnings.
//!
//! ```text
//! parse_catalog
//! └── CatalogParser
//!     ├── ServiceParser ── PropertyParser, ServiceParser
//!     ├── PropertyParser
//!     └── DatasetNodeParser (dataset | catalogRef)
//!         ├── AccessParser ── DataSizeParser
//!         ├── MetadataContainerParser ── ThreddsMetadataParser
//!         ├── ThreddsMetadataParser ── one of 13 metadata delegates
//!         └── DatasetNodeParser ...
//! ```

use std::path::Path;

use log::{debug, info};
use url::Url;

use crate::builder::CatalogBuilder;
use crate::event::{EventSource, ParseEvent, XmlEventSource};
use crate::issue::{IssueKind, Issues, ParseError};
use crate::names::elements;

use catalog::CatalogParser;
use engine::{ElementParser, ParseContext};

pub use dataset::DatasetNodeHelper;
pub use engine::{CancelFlag, ParseOptions, DEFAULT_MAX_DEPTH};

mod catalog;
mod dataset;
mod engine;
mod thredds_metadata;


/// A parsed catalog with every non-fatal issue found along the way
#[derive(Debug)]
pub struct ParsedCatalog {
    /// Root builder
    pub catalog: CatalogBuilder,
    /// Accumulated warnings and errors, in document order
    pub issues: Issues,
}

/// Parse a catalog from an event source
///
/// `doc_base_uri` is the absolute URI the document was retrieved from.
/// Warnings and errors are returned in [`ParsedCatalog::issues`]; a fatal
/// issue aborts the parse.
pub fn parse_catalog<S: EventSource>(
    mut source: S,
    doc_base_uri: &str,
    options: &ParseOptions,
) -> Result<ParsedCatalog, ParseError> {
    let base = Url::parse(doc_base_uri).map_err(|e| {
        ParseError::fatal(
            IssueKind::Attribute,
            format!("invalid document base URI [{}]: {}", doc_base_uri, e),
            source.location(),
            Some(elements::CATALOG),
        )
    })?;

    let mut cx = ParseContext::new(&mut source, options.clone());
    let root = cx.peek_start_name(&elements::CATALOG)?;
    if !CatalogParser::is_mine(&root) {
        return Err(cx.fatal(
            IssueKind::Structural,
            format!("document root is <{}>, not <catalog>", root.local_part()),
            &root,
        ));
    }

    let catalog = CatalogParser::new(base).parse(&mut cx)?;
    check_trailing_content(&mut cx)?;

    let issues = cx.into_issues();
    info!(
        "parsed catalog [{}]: {} datasets, {} issues",
        catalog.name.as_deref().unwrap_or(""),
        catalog.datasets.len(),
        issues.len()
    );
    Ok(ParsedCatalog { catalog, issues })
}

fn check_trailing_content(cx: &mut ParseContext<'_>) -> Result<(), ParseError> {
    cx.skip_whitespace(&elements::CATALOG)?;
    let trailing = match cx.peek(&elements::CATALOG)? {
        None => return Ok(()),
        Some(ParseEvent::StartElement { name, .. }) | Some(ParseEvent::EndElement { name }) => {
            format!("<{}>", name.local_part())
        }
        Some(ParseEvent::Characters { .. }) => "text".to_string(),
    };
    cx.warning(
        IssueKind::Structural,
        format!("content after the end of <catalog> ignored, starting with {}", trailing),
        &elements::CATALOG,
    );
    Ok(())
}

/// Parse a catalog held in memory
pub fn parse_catalog_str(
    text: &str,
    doc_base_uri: &str,
    options: &ParseOptions,
) -> Result<ParsedCatalog, ParseError> {
    parse_catalog(XmlEventSource::from_text(text), doc_base_uri, options)
}

/// Parse a catalog file
///
/// Without an explicit base URI the file's own `file://` URL is used.
pub fn parse_catalog_file<P: AsRef<Path>>(
    path: P,
    doc_base_uri: Option<&str>,
    options: &ParseOptions,
) -> Result<ParsedCatalog, ParseError> {
    let path = path.as_ref();
    let source = XmlEventSource::open(path).map_err(|source| ParseError::Stream {
        element: elements::CATALOG,
        source,
    })?;

    let base = match doc_base_uri {
        Some(base) => base.to_string(),
        None => file_url(path).ok_or_else(|| {
            ParseError::fatal(
                IssueKind::Attribute,
                format!("cannot derive a base URI from path [{}]", path.display()),
                source.location(),
                Some(elements::CATALOG),
            )
        })?,
    };
    debug!("parsing {} with base URI {}", path.display(), base);
    parse_catalog(source, &base, options)
}

fn file_url(path: &Path) -> Option<String> {
    let absolute = std::fs::canonicalize(path).ok()?;
    Url::from_file_path(absolute).ok().map(String::from)
}
