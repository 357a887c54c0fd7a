//! Percolator tab-delimited input (`.pin`) writer
//!
//! ```text
//! SpecId  Label  ScanNr  ExpMass  CalcMass  <features...>  Peptide  Proteins
//! DefaultDirection  -  -  -  -  <defaults...>
//! t_17_2_1  1  17  1234.5678  1233.5612  45.2  ...  K.PEPTIDE.R  sp|P1  sp|P2
//! ```
//!
//! Protein occurrences fill one trailing column each.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::{PsmSink, SinkError};
use crate::features::FeatureSchema;
use crate::psm::PsmRecord;

const LEADING_COLUMNS: [&str; 5] = ["SpecId", "Label", "ScanNr", "ExpMass", "CalcMass"];

/// Writes PSMs as Percolator input
pub struct PinWriter<W: Write> {
    writer: csv::Writer<W>,
    schema: Option<FeatureSchema>,
    default_direction: bool,
    rows_written: usize,
}

impl PinWriter<BufWriter<File>> {
    /// Create a `.pin` file, truncating an existing one
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PinWriter<W> {
    pub fn new(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        Self {
            writer,
            schema: None,
            default_direction: true,
            rows_written: 0,
        }
    }

    /// Write (or omit) the `DefaultDirection` row after the header
    pub fn with_default_direction(mut self, enabled: bool) -> Self {
        self.default_direction = enabled;
        self
    }

    /// Number of PSM rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn finish(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::IoError(e.into_error()))
    }

    fn write_header(&mut self, schema: &FeatureSchema) -> Result<(), SinkError> {
        let mut header: Vec<&str> = LEADING_COLUMNS.to_vec();
        header.extend(schema.names());
        header.push("Peptide");
        header.push("Proteins");
        self.writer.write_record(&header)?;

        if self.default_direction {
            let mut row = vec!["DefaultDirection".to_string()];
            row.extend(std::iter::repeat("-".to_string()).take(LEADING_COLUMNS.len() - 1));
            row.extend(schema.features().iter().map(|f| f.default.to_string()));
            self.writer.write_record(&row)?;
        }
        Ok(())
    }
}

impl<W: Write> PsmSink for PinWriter<W> {
    fn begin_file(&mut self, file_id: &str, schema: &FeatureSchema) -> Result<(), SinkError> {
        match &self.schema {
            None => {
                self.write_header(schema)?;
                self.schema = Some(schema.clone());
                Ok(())
            }
            Some(existing) if existing.names().eq(schema.names()) => Ok(()),
            Some(_) => Err(SinkError::SchemaMismatch {
                file: file_id.to_string(),
            }),
        }
    }

    fn save(&mut self, spectrum_id: u32, psm: PsmRecord) -> Result<(), SinkError> {
        let expected = self.schema.as_ref().ok_or(SinkError::NotInitialized)?.len();
        if psm.features.len() != expected {
            return Err(SinkError::FeatureCount {
                id: psm.id,
                expected,
                actual: psm.features.len(),
            });
        }

        let mut row = Vec::with_capacity(LEADING_COLUMNS.len() + expected + 1 + psm.occurrences.len());
        row.push(psm.id.clone());
        row.push(if psm.is_decoy { "-1" } else { "1" }.to_string());
        row.push(spectrum_id.to_string());
        row.push(psm.observed_mass.to_string());
        row.push(psm.calculated_mass.to_string());
        row.extend(psm.features.iter().map(|v| v.to_string()));
        row.push(psm.flanked_peptide());
        row.extend(psm.occurrences.iter().map(|o| o.protein.clone()));
        self.writer.write_record(&row)?;

        self.rows_written += 1;
        debug!("Wrote PSM {}", psm.id);
        Ok(())
    }
}
