//! # PSM Sinks
//!
//! Destinations for finished PSM records. A sink is told the feature
//! schema of each file before that file's records arrive, then receives
//! records one at a time in emission order.

mod error;
mod pin;

pub use error::SinkError;
pub use pin::PinWriter;

use crate::features::FeatureSchema;
use crate::psm::PsmRecord;

/// Receiver of finished PSMs
pub trait PsmSink {
    /// Called once per input file, after capability detection
    fn begin_file(&mut self, _file_id: &str, _schema: &FeatureSchema) -> Result<(), SinkError> {
        Ok(())
    }

    /// Persist one PSM; ownership moves to the sink
    fn save(&mut self, spectrum_id: u32, psm: PsmRecord) -> Result<(), SinkError>;
}

impl<S: PsmSink + ?Sized> PsmSink for &mut S {
    fn begin_file(&mut self, file_id: &str, schema: &FeatureSchema) -> Result<(), SinkError> {
        (**self).begin_file(file_id, schema)
    }

    fn save(&mut self, spectrum_id: u32, psm: PsmRecord) -> Result<(), SinkError> {
        (**self).save(spectrum_id, psm)
    }
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Schemas announced so far, by file id
    pub schemas: Vec<(String, FeatureSchema)>,
    /// Saved records with their spectrum id
    pub psms: Vec<(u32, PsmRecord)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.psms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psms.is_empty()
    }

    /// Records in emission order
    pub fn records(&self) -> impl Iterator<Item = &PsmRecord> {
        self.psms.iter().map(|(_, psm)| psm)
    }
}

impl PsmSink for MemorySink {
    fn begin_file(&mut self, file_id: &str, schema: &FeatureSchema) -> Result<(), SinkError> {
        self.schemas.push((file_id.to_string(), schema.clone()));
        Ok(())
    }

    fn save(&mut self, spectrum_id: u32, psm: PsmRecord) -> Result<(), SinkError> {
        self.psms.push((spectrum_id, psm));
        Ok(())
    }
}
