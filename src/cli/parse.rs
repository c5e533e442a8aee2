use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use thredds_catalog::builder::{DatasetNodeBuilder, DatasetNodeKind, ServiceBuilder};
use thredds_catalog::{parse_catalog_file, CatalogBuilder, Issue};

use super::config::{Config, OutputFormat};

#[derive(Serialize)]
struct ParseOutput<'a> {
    catalog: &'a CatalogBuilder,
    issues: &'a [Issue],
}

/// Parse a catalog and print its builder tree
pub fn run(file: PathBuf, base_uri: Option<String>, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::load(config.as_deref())?;
    let format = if json {
        OutputFormat::Json
    } else {
        config.output.format.unwrap_or_default()
    };

    info!("Parsing {}", file.display());
    let parsed = parse_catalog_file(&file, base_uri.as_deref(), &config.parse_options())
        .with_context(|| format!("Failed to parse catalog: {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            let output = ParseOutput {
                catalog: &parsed.catalog,
                issues: parsed.issues.as_slice(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize catalog")?
            );
        }
        OutputFormat::Text => {
            print!("{}", outline(&parsed.catalog));
            for issue in &parsed.issues {
                eprintln!("{}", issue);
            }
        }
    }
    Ok(())
}

/// Indented outline of a catalog
fn outline(catalog: &CatalogBuilder) -> String {
    let mut out = format!(
        "catalog {} (version {}, base {})\n",
        catalog.name.as_deref().unwrap_or("<unnamed>"),
        catalog.version.as_deref().unwrap_or("-"),
        catalog.doc_base_uri
    );
    for service in &catalog.services {
        outline_service(&mut out, service, 1);
    }
    for dataset in &catalog.datasets {
        outline_dataset(&mut out, dataset, 1);
    }
    out
}

fn outline_service(out: &mut String, service: &ServiceBuilder, depth: usize) {
    out.push_str(&format!(
        "{}service {} [{}] {}\n",
        "  ".repeat(depth),
        service.name,
        service.service_type,
        service.base
    ));
    for nested in &service.services {
        outline_service(out, nested, depth + 1);
    }
}

fn outline_dataset(out: &mut String, dataset: &DatasetNodeBuilder, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = dataset.name.as_deref().unwrap_or("<unnamed>");
    match &dataset.kind {
        DatasetNodeKind::Dataset => out.push_str(&format!("{}dataset {}", indent, name)),
        DatasetNodeKind::CatalogRef { href } => out.push_str(&format!("{}catalogRef {} -> {}", indent, name, href)),
    }
    if let Some(service) = &dataset.default_service_name {
        out.push_str(&format!(" (service {})", service));
    }
    out.push('\n');
    for access in &dataset.access {
        out.push_str(&format!("{}  access {}\n", indent, access.url_path));
    }
    for child in &dataset.datasets {
        outline_dataset(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thredds_catalog::{parse_catalog_str, ParseOptions};

    #[test]
    fn test_outline() {
        let xml = r#"<catalog xmlns="http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0"
                              xmlns:xlink="http://www.w3.org/1999/xlink" name="Top">
            <service name="odap" serviceType="OPENDAP" base="/dodsC/"/>
            <dataset name="Parent" serviceName="odap">
              <dataset name="Child" urlPath="child.nc"><access urlPath="child.nc"/></dataset>
            </dataset>
            <catalogRef xlink:href="more.xml" xlink:title="More"/>
        </catalog>"#;
        let parsed = parse_catalog_str(xml, "http://example.org/catalog.xml", &ParseOptions::default()).unwrap();
        let text = outline(&parsed.catalog);

        assert!(text.starts_with("catalog Top (version -, base http://example.org/catalog.xml)"));
        assert!(text.contains("  service odap [OPENDAP] /dodsC/"));
        assert!(text.contains("  dataset Parent (service odap)"));
        assert!(text.contains("    dataset Child\n"));
        assert!(text.contains("      access child.nc"));
        assert!(text.contains("  catalogRef More -> more.xml"));
    }
}
