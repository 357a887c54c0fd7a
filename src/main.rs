//! # tandem2pin
//!
//! Command-line front end of `tandem-pin`.
//!
//! ## Usage
//!
//! ```bash
//! # Separate target and decoy searches
//! tandem2pin convert target.t.xml --decoy decoy.t.xml -o results.pin
//!
//! # Concatenated target/decoy search, decoys labelled "DECOY_"
//! tandem2pin convert combined.t.xml --pattern DECOY_ > results.pin
//!
//! # Show the features a file would produce
//! tandem2pin info target.t.xml --json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
