use anyhow::Result;
use log::info;
use std::path::PathBuf;

use thredds_catalog::{parse_catalog_file, IssueReport};

use super::config::Config;

/// Parse a catalog and report every issue found
pub fn run(file: PathBuf, base_uri: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?;

    info!("THREDDS Catalog Check");
    info!("=====================");
    info!("File: {}", file.display());

    let source = file.display().to_string();
    let result = parse_catalog_file(&file, base_uri.as_deref(), &config.parse_options());
    let (issues, failure) = match &result {
        Ok(parsed) => (parsed.issues.as_slice(), None),
        Err(e) => (&[][..], Some(e)),
    };
    let report = IssueReport::new(source, issues, failure);

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    let failed = report.has_failure() || (config.fail_on_warnings() && !issues.is_empty());
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
