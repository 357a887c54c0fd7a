//! # X!Tandem Parser Module
//!
//! Streaming parser for the bioml XML documents written by the X!Tandem
//! search engine.
//!
//! ## Document Structure
//!
//! ```text
//! bioml
//! ├── group type="model" (one per spectrum; id, mh, z, sumI, maxI, fI)
//! │   ├── protein* (label)
//! │   │   └── peptide
//! │   │       └── domain* (seq, mh, delta, hyperscore, nextscore, pre, post,
//! │   │           │        start, end, {a,b,c,x,y,z}_score, {a,b,c,x,y,z}_ions)
//! │   │           └── aa* (type, at, modified)
//! │   └── group type="support" (fragment spectrum, skipped)
//! └── group type="parameters" (search parameters, skipped)
//! ```

mod error;
mod models;
pub mod streamer;

pub use error::TandemError;
pub use models::{
    sanitize_label, AaModification, ChannelReading, Domain, IonChannel, ProteinMatch,
    SpectrumResult,
};
pub use streamer::{GroupIterator, TandemStreamer};
