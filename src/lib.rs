//! # tandem-pin - X!Tandem results as Percolator features
//!
//! `tandem-pin` reads X!Tandem `bioml` result files and turns every
//! peptide-spectrum match (PSM) into a fixed-length numeric feature vector
//! suitable for Percolator-style rescoring.
//!
//! ## Key Features
//!
//! - **Streaming**: result files are parsed one spectrum group at a time
//!   with quick-xml; no document tree is ever built.
//!
//! - **Per-file schema**: a first pass detects the ion series and the
//!   charge range present in a file, which fixes the feature layout for
//!   every PSM of that file.
//!
//! - **Pluggable output**: PSMs are handed to a [`sink::PsmSink`]. A
//!   Percolator `.pin` writer and an in-memory collector are included.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tandem_pin::converter::TandemConverter;
//! use tandem_pin::options::ParseOptions;
//! use tandem_pin::sink::PinWriter;
//!
//! let options = ParseOptions::default().with_ptm_scheme("*:21")?;
//! let converter = TandemConverter::new(options)?;
//!
//! let mut writer = PinWriter::create("results.pin")?;
//! let stats = converter.convert_all(&["target.t.xml"], &["decoy.t.xml"], &mut writer)?;
//! writer.flush()?;
//! println!("Wrote {} PSMs", stats.psms);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`tandem`]: streaming X!Tandem parser
//! - [`features`]: capability probe and feature schema
//! - [`enzyme`]: cleavage rules
//! - [`psm`]: PSM records and the feature extractor
//! - [`sink`]: PSM consumers
//! - [`options`]: conversion settings
//! - [`converter`]: two-pass file conversion

pub mod converter;
pub mod enzyme;
pub mod features;
pub mod options;
pub mod psm;
pub mod sink;
pub mod tandem;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::converter::{ConversionStats, TandemConverter};
    pub use crate::enzyme::{Enzyme, EnzymeKind};
    pub use crate::features::{DetectedCapabilities, FeatureSchema};
    pub use crate::options::ParseOptions;
    pub use crate::psm::{Modification, PsmRecord};
    pub use crate::sink::{MemorySink, PinWriter, PsmSink, SinkError};
    pub use crate::tandem::{IonChannel, TandemError, TandemStreamer};
}
