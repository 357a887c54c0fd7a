//! X!Tandem to PSM converter
//!
//! Each file is read twice. The first pass detects the ion channels and
//! the charge range, which fix the feature schema; the second pass builds
//! and saves the PSMs spectrum by spectrum.

mod input;

use std::fmt;
use std::io::{BufRead, Cursor};
use std::path::Path;

use log::info;

pub use input::{expand_inputs, file_id, is_meta_file};

use crate::features::{probe, DetectedCapabilities, FeatureSchema};
use crate::options::ParseOptions;
use crate::psm::PsmBuilder;
use crate::sink::PsmSink;
use crate::tandem::{TandemError, TandemStreamer};

/// Statistics from a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Result files processed
    pub files: usize,
    /// Spectrum groups processed
    pub spectra: usize,
    /// PSMs handed to the sink
    pub psms: usize,
    pub targets: usize,
    pub decoys: usize,
}

impl ConversionStats {
    fn merge(&mut self, other: &ConversionStats) {
        self.files += other.files;
        self.spectra += other.spectra;
        self.psms += other.psms;
        self.targets += other.targets;
        self.decoys += other.decoys;
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} spectra, {} PSMs ({} targets, {} decoys)",
            self.files, self.spectra, self.psms, self.targets, self.decoys
        )
    }
}

/// Converter from X!Tandem results to PSM records
pub struct TandemConverter {
    options: ParseOptions,
}

impl TandemConverter {
    /// Create a converter; the options are checked up front
    pub fn new(options: ParseOptions) -> Result<Self, crate::options::OptionsError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Run only the capability probe over a file
    pub fn detect<P: AsRef<Path>>(&self, path: P) -> Result<DetectedCapabilities, TandemError> {
        let path = path.as_ref();
        probe(TandemStreamer::open(path)?.groups(), &path.display().to_string())
    }

    /// Convert one result file
    ///
    /// `is_decoy` labels every PSM of the file unless the options mark
    /// inputs as combined target/decoy files.
    pub fn convert_file<P: AsRef<Path>, S: PsmSink + ?Sized>(
        &self,
        path: P,
        is_decoy: bool,
        sink: &mut S,
    ) -> Result<ConversionStats, TandemError> {
        let path = path.as_ref();
        info!("Reading {}", path.display());
        self.convert_with(&file_id(path), is_decoy, sink, || TandemStreamer::open(path))
    }

    /// Convert an in-memory result document
    pub fn convert_bytes<S: PsmSink + ?Sized>(
        &self,
        file_id: &str,
        document: &[u8],
        is_decoy: bool,
        sink: &mut S,
    ) -> Result<ConversionStats, TandemError> {
        self.convert_with(file_id, is_decoy, sink, || {
            TandemStreamer::new(Cursor::new(document))
        })
    }

    /// Convert target files, then decoy files, into one sink
    ///
    /// Meta-files are expanded first. The first failing file aborts the run.
    pub fn convert_all<P: AsRef<Path>, S: PsmSink + ?Sized>(
        &self,
        targets: &[P],
        decoys: &[P],
        sink: &mut S,
    ) -> Result<ConversionStats, TandemError> {
        let mut total = ConversionStats::default();
        for (paths, is_decoy) in [(targets, false), (decoys, true)] {
            for path in expand_inputs(paths)? {
                let stats = self.convert_file(&path, is_decoy, sink)?;
                total.merge(&stats);
            }
        }
        info!("Conversion complete: {total}");
        Ok(total)
    }

    fn convert_with<R, F, S>(
        &self,
        file_id: &str,
        is_decoy: bool,
        sink: &mut S,
        open: F,
    ) -> Result<ConversionStats, TandemError>
    where
        R: BufRead,
        F: Fn() -> Result<TandemStreamer<R>, TandemError>,
        S: PsmSink + ?Sized,
    {
        let capabilities = probe(open()?.groups(), file_id)?;
        let schema = FeatureSchema::build(&capabilities, &self.options);
        info!("{}: {} features per PSM", file_id, schema.len());
        sink.begin_file(file_id, &schema)?;

        let builder = PsmBuilder::new(file_id, &self.options, &capabilities, &schema);
        let mut stats = ConversionStats {
            files: 1,
            ..Default::default()
        };
        for group in open()?.groups() {
            let spectrum = builder.emit_spectrum(&group?, is_decoy, sink)?;
            stats.spectra += 1;
            stats.psms += spectrum.psms;
            stats.decoys += spectrum.decoys;
            stats.targets += spectrum.psms - spectrum.decoys;
        }

        info!("{}: {}", file_id, stats);
        Ok(stats)
    }
}
