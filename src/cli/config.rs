//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file:
//!
//! ```toml
//! # thredds-catalog.toml
//! [parser]
//! max_depth = 128
//! fail_on_warnings = true
//!
//! [output]
//! format = "json"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use thredds_catalog::ParseOptions;

/// Root configuration structure for thredds-catalog.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the parser.
#[derive(Debug, Default, Deserialize)]
pub struct ParserConfig {
    /// Maximum element nesting depth.
    pub max_depth: Option<usize>,

    /// Treat accumulated warnings and errors as a failed check.
    pub fail_on_warnings: Option<bool>,
}

/// Configuration for printed results.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Result format.
    pub format: Option<OutputFormat>,
}

/// How `parse` prints the builder tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented outline
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, else use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parser options with configured overrides applied.
    pub fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::default();
        match self.parser.max_depth {
            Some(depth) => options.with_max_depth(depth),
            None => options,
        }
    }

    /// Whether warnings fail a check.
    pub fn fail_on_warnings(&self) -> bool {
        self.parser.fail_on_warnings.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [parser]
            max_depth = 128
            fail_on_warnings = true

            [output]
            format = "json"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.parser.max_depth, Some(128));
        assert_eq!(config.parser.fail_on_warnings, Some(true));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.parse_options().max_depth, 128);
        assert!(config.fail_on_warnings());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [parser]
            fail_on_warnings = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.parser.max_depth, None);
        assert_eq!(config.parse_options().max_depth, thredds_catalog::parser::DEFAULT_MAX_DEPTH);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(!config.fail_on_warnings());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Config::from_str("[output]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nmax_depth = 8").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.parser.max_depth, Some(8));
        assert!(Config::from_file(Path::new("/nonexistent/thredds.toml")).is_err());
    }
}
