//! Options controlling feature extraction
//!
//! These are consumed read-only by the converter; how they are gathered
//! (command line, TOML file) is up to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enzyme::EnzymeKind;
use crate::features::is_canonical;

/// Decoy protein prefix used when none is configured
pub const DEFAULT_DECOY_PATTERN: &str = "random_";

/// Errors in user-supplied options
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// A PTM scheme entry is not of the form `symbol:accession`
    #[error("Invalid PTM scheme entry '{0}', expected <symbol>:<unimod accession>")]
    InvalidSchemeEntry(String),

    /// A PTM scheme symbol is also an amino acid
    #[error("PTM symbol '{0}' is a canonical amino acid")]
    AminoAcidSymbol(char),

    /// The same symbol appears twice in the scheme
    #[error("PTM symbol '{0}' is defined more than once")]
    DuplicateSymbol(char),

    /// Zero hits per spectrum requested
    #[error("hits per spectrum must be at least 1")]
    ZeroHits,
}

/// Feature extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Number of distinct peptides kept per spectrum
    pub hits_per_spectrum: usize,

    /// Sequence symbol to UniMod accession
    pub ptm_scheme: BTreeMap<char, u32>,

    /// Digestion enzyme for the enzyme-specificity features
    pub enzyme: EnzymeKind,

    /// Emit the `ptm` count feature
    pub calc_ptms: bool,

    /// Emit the `PNGaseF` deamidation site feature
    pub pngasef: bool,

    /// Emit one frequency feature per amino acid
    pub calc_aa_frequencies: bool,

    /// Input files hold targets and decoys; labels decide
    pub combined: bool,

    /// Substring marking a decoy protein label
    pub decoy_pattern: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            hits_per_spectrum: 1,
            ptm_scheme: BTreeMap::new(),
            enzyme: EnzymeKind::default(),
            calc_ptms: false,
            pngasef: false,
            calc_aa_frequencies: false,
            combined: false,
            decoy_pattern: DEFAULT_DECOY_PATTERN.to_string(),
        }
    }
}

impl ParseOptions {
    /// Check option consistency
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.hits_per_spectrum == 0 {
            return Err(OptionsError::ZeroHits);
        }
        if let Some(symbol) = self.ptm_scheme.keys().find(|s| is_canonical(**s)) {
            return Err(OptionsError::AminoAcidSymbol(*symbol));
        }
        Ok(())
    }

    /// Set the PTM scheme from its `"*:21,#:35"` form
    pub fn with_ptm_scheme(mut self, scheme: &str) -> Result<Self, OptionsError> {
        self.ptm_scheme = parse_ptm_scheme(scheme)?;
        Ok(self)
    }

    /// True when the decoy pattern occurs in `label`
    pub fn is_decoy_label(&self, label: &str) -> bool {
        label.contains(&self.decoy_pattern)
    }
}

/// Parse a PTM scheme of the form `"*:21,#:35"`
pub fn parse_ptm_scheme(scheme: &str) -> Result<BTreeMap<char, u32>, OptionsError> {
    let mut table = BTreeMap::new();
    for entry in scheme.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || OptionsError::InvalidSchemeEntry(entry.to_string());
        let (symbol, accession) = entry.split_once(':').ok_or_else(invalid)?;
        let mut symbols = symbol.trim().chars();
        let symbol = match (symbols.next(), symbols.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid()),
        };
        let accession = accession
            .trim()
            .trim_start_matches("UNIMOD:")
            .parse()
            .map_err(|_| invalid())?;
        if is_canonical(symbol) {
            return Err(OptionsError::AminoAcidSymbol(symbol));
        }
        if table.insert(symbol, accession).is_some() {
            return Err(OptionsError::DuplicateSymbol(symbol));
        }
    }
    Ok(table)
}
