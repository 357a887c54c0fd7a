//! # Peptide-Spectrum Matches
//!
//! Output records of the conversion and the code that builds them from
//! spectrum groups.

mod builder;
mod index;

use std::fmt;

use serde::Serialize;

pub use builder::{PsmBuilder, SpectrumStats};
pub use index::PeptideProteinMap;

/// A modification resolved onto a peptide
///
/// Positions are 1-based residue indices into the unmodified sequence;
/// 0 denotes the peptide N-terminus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Modification {
    /// Symbol in the sequence string, mapped through the PTM scheme
    Scheme {
        position: usize,
        symbol: char,
        accession: u32,
    },
    /// Explicit `<aa>` record of the domain
    Free {
        position: usize,
        residue: Option<char>,
        mass: String,
    },
}

impl Modification {
    pub fn position(&self) -> usize {
        match self {
            Modification::Scheme { position, .. } | Modification::Free { position, .. } => {
                *position
            }
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Scheme { accession, .. } => write!(f, "[UNIMOD:{accession}]"),
            Modification::Free { mass, .. } => {
                if mass.starts_with('-') || mass.starts_with('+') {
                    write!(f, "[{mass}]")
                } else {
                    write!(f, "[+{mass}]")
                }
            }
        }
    }
}

/// Unmodified peptide sequence plus its modifications
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Peptide {
    pub sequence: String,
    pub modifications: Vec<Modification>,
}

impl Peptide {
    /// Sequence with modifications written after the residue they sit on
    pub fn modified_sequence(&self) -> String {
        let mut mods: Vec<&Modification> = self.modifications.iter().collect();
        mods.sort_by_key(|m| m.position());

        let mut out = String::with_capacity(self.sequence.len() + 16 * mods.len());
        let mut pending = mods.into_iter().peekable();
        while let Some(m) = pending.next_if(|m| m.position() == 0) {
            out.push_str(&m.to_string());
        }
        for (i, residue) in self.sequence.chars().enumerate() {
            out.push(residue);
            while let Some(m) = pending.next_if(|m| m.position() == i + 1) {
                out.push_str(&m.to_string());
            }
        }
        for m in pending {
            out.push_str(&m.to_string());
        }
        out
    }
}

/// A protein the peptide was found in, with its flanking residues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProteinOccurrence {
    pub protein: String,
    pub flank_n: char,
    pub flank_c: char,
}

/// One peptide-spectrum match with its feature vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsmRecord {
    pub id: String,
    /// Spectrum the match belongs to
    pub spectrum_id: u32,
    pub is_decoy: bool,
    pub observed_mass: f64,
    pub calculated_mass: f64,
    pub charge: u32,
    /// Values in feature schema order
    pub features: Vec<f64>,
    pub peptide: Peptide,
    pub occurrences: Vec<ProteinOccurrence>,
}

impl PsmRecord {
    /// Flanked peptide, e.g. `K.PEPM[UNIMOD:35]TIDE.R`
    pub fn flanked_peptide(&self) -> String {
        let (flank_n, flank_c) = self
            .occurrences
            .first()
            .map(|o| (o.flank_n, o.flank_c))
            .unwrap_or((crate::features::NO_FLANK, crate::features::NO_FLANK));
        format!("{}.{}.{}", flank_n, self.peptide.modified_sequence(), flank_c)
    }
}
