//! # handset
//!
//! Command-line front end for the catalog report pipeline.
//!
//! ```bash
//! handset run --input mobile_catalog.csv --output reports/
//! handset inspect-schema --input mobile_catalog.csv
//! handset init-config
//! ```
//!
//! Console logging goes to stderr; report listings go to stdout.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    handset::logging::init(&cli.log_level)?;

    cli::run_command(cli.command)
}
