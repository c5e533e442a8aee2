//! # thredds-catalog
//!
//! Command-line front end for the THREDDS catalog parser.
//!
//! ## Usage
//!
//! ```bash
//! # Print the builder tree of a catalog
//! thredds-catalog parse catalog.xml
//!
//! # Same, as JSON, with an explicit base URI
//! thredds-catalog parse catalog.xml --json --base-uri http://server/thredds/catalog.xml
//!
//! # Report issues; exits non-zero when the parse fails
//! thredds-catalog check catalog.xml --config thredds-catalog.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
