use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod config;
mod parse;

/// thredds-catalog - THREDDS catalog parser and checker
#[derive(Parser)]
#[command(name = "thredds-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a catalog and print the resulting builder tree
    Parse {
        /// Catalog file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Base URI of the document (defaults to the file's own URL)
        #[arg(long, value_name = "URI")]
        base_uri: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print JSON instead of an outline
        #[arg(long)]
        json: bool,
    },

    /// Parse a catalog and report its issues
    Check {
        /// Catalog file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Base URI of the document (defaults to the file's own URL)
        #[arg(long, value_name = "URI")]
        base_uri: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse {
            file,
            base_uri,
            config,
            json,
        } => parse::run(file, base_uri, config, json),
        Commands::Check {
            file,
            base_uri,
            config,
        } => check::run(file, base_uri, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["thredds-catalog", "-vv", "parse", "catalog.xml", "--json"]).unwrap();
        assert_eq!(cli.verbosity(), 2);
        assert!(matches!(cli.command, Commands::Parse { json: true, .. }));

        let cli = Cli::try_parse_from([
            "thredds-catalog",
            "check",
            "catalog.xml",
            "--base-uri",
            "http://example.org/catalog.xml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Check { base_uri: Some(_), .. }));
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["thredds-catalog", "parse"]).is_err());
    }
}
