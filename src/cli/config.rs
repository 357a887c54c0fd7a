//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every run can live in a
//! config file:
//!
//! ```toml
//! # tandem2pin.toml
//! [conversion]
//! hits_per_spectrum = 3
//! enzyme = "trypsin"
//! ptm_scheme = "*:21"
//! calc_ptms = true
//! pngasef = false
//! calc_aa_frequencies = false
//! decoy_pattern = "random_"
//! default_direction = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use tandem_pin::enzyme::EnzymeKind;
use tandem_pin::options::ParseOptions;

use super::FeatureArgs;

/// Root configuration structure for tandem2pin.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the convert and info commands.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// Distinct peptides kept per spectrum.
    pub hits_per_spectrum: Option<usize>,

    /// Digestion enzyme.
    pub enzyme: Option<EnzymeKind>,

    /// PTM scheme in "*:21,#:35" form.
    pub ptm_scheme: Option<String>,

    pub calc_ptms: Option<bool>,

    pub pngasef: Option<bool>,

    pub calc_aa_frequencies: Option<bool>,

    /// Substring marking decoy protein labels.
    pub decoy_pattern: Option<String>,

    /// Write the DefaultDirection row of the .pin file.
    pub default_direction: Option<bool>,
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

    /// Load the config named by `--config`, or the empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve parse options: CLI flags, then this config, then defaults.
    pub fn parse_options(&self, args: &FeatureArgs) -> Result<ParseOptions> {
        let conversion = &self.conversion;
        let mut options = ParseOptions::default();

        if let Some(hits) = args.hits_per_spectrum.or(conversion.hits_per_spectrum) {
            options.hits_per_spectrum = hits;
        }
        if let Some(enzyme) = args.enzyme.or(conversion.enzyme) {
            options.enzyme = enzyme;
        }
        if let Some(scheme) = args.ptm_scheme.as_ref().or(conversion.ptm_scheme.as_ref()) {
            options = options
                .with_ptm_scheme(scheme)
                .with_context(|| format!("Invalid PTM scheme '{scheme}'"))?;
        }
        if let Some(pattern) = args
            .decoy_pattern
            .as_ref()
            .or(conversion.decoy_pattern.as_ref())
        {
            options.decoy_pattern = pattern.clone();
        }
        options.calc_ptms = args.calc_ptms || conversion.calc_ptms.unwrap_or(false);
        options.pngasef = args.pngasef || conversion.pngasef.unwrap_or(false);
        options.calc_aa_frequencies =
            args.calc_aa_frequencies || conversion.calc_aa_frequencies.unwrap_or(false);

        Ok(options)
    }
}
