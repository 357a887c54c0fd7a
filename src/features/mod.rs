//! # Feature Extraction
//!
//! Capability detection and the fixed feature layout of a result file.
//!
//! Feature order:
//!
//! ```text
//! hyperscore, deltaScore
//! frac_ion_{a,b,c,x,y,z}      (detected channels only)
//! Mass, dM, absdM, PepLen
//! Charge{min}..Charge{max}    (one-hot)
//! enzN, enzC, enzInt          (when an enzyme is set)
//! ptm                         (calc_ptms)
//! PNGaseF                     (pngasef)
//! {A..Y}-Freq                 (calc_aa_frequencies)
//! ```

mod capabilities;
mod schema;
mod sequence;

pub use capabilities::{probe, DetectedCapabilities};
pub use schema::{FeatureDescription, FeatureSchema};
pub use sequence::{
    aa_frequencies, count_ptms, flanked, is_canonical, peptide_length, pngasef_sites,
    strip_modifications, AMINO_ACIDS, NO_FLANK,
};
