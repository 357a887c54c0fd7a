use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tandem_pin::enzyme::EnzymeKind;

mod config;
mod convert;
mod info;

pub use config::Config;

/// tandem2pin - X!Tandem results to Percolator input
#[derive(Parser)]
#[command(name = "tandem2pin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Feature extraction flags shared by the subcommands
///
/// Flags left unset fall back to the config file, then to the defaults.
#[derive(Args, Debug, Default)]
pub struct FeatureArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Distinct peptides kept per spectrum
    #[arg(short = 'n', long = "hits", value_name = "N")]
    pub hits_per_spectrum: Option<usize>,

    /// Digestion enzyme (no_enzyme, trypsin, trypsinp, lys-c, ...)
    #[arg(short, long)]
    pub enzyme: Option<EnzymeKind>,

    /// PTM symbols to UniMod accessions, e.g. "*:21,#:35"
    #[arg(short = 'p', long, value_name = "SCHEME")]
    pub ptm_scheme: Option<String>,

    /// Add the ptm count feature
    #[arg(long)]
    pub calc_ptms: bool,

    /// Add the PNGaseF deamidation site feature
    #[arg(long)]
    pub pngasef: bool,

    /// Add one frequency feature per amino acid
    #[arg(long = "aa-freq")]
    pub calc_aa_frequencies: bool,

    /// Substring marking decoy protein labels
    #[arg(long = "pattern", value_name = "PATTERN")]
    pub decoy_pattern: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert X!Tandem result files to a Percolator .pin file
    Convert {
        /// Target result files (or meta-files listing them)
        #[arg(value_name = "TARGET", required = true)]
        targets: Vec<PathBuf>,

        /// Decoy result files; without any, targets hold both and labels decide
        #[arg(short, long = "decoy", value_name = "FILE")]
        decoys: Vec<PathBuf>,

        /// Output .pin path (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Omit the DefaultDirection row
        #[arg(long)]
        no_default_direction: bool,

        #[command(flatten)]
        features: FeatureArgs,
    },

    /// Show the capabilities and feature layout of a result file
    Info {
        /// X!Tandem result file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        features: FeatureArgs,
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
        Commands::Convert {
            targets,
            decoys,
            output,
            no_default_direction,
            features,
        } => convert::run(targets, decoys, output, no_default_direction, features),
        Commands::Info {
            file,
            json,
            features,
        } => info::run(file, json, features),
    }
}
