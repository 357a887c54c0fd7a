use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tandem_pin::converter::TandemConverter;
use tandem_pin::sink::PinWriter;

use super::{Config, FeatureArgs};

/// Convert X!Tandem result files into one .pin file
pub fn run(
    targets: Vec<PathBuf>,
    decoys: Vec<PathBuf>,
    output: Option<PathBuf>,
    no_default_direction: bool,
    features: FeatureArgs,
) -> Result<()> {
    for input in targets.iter().chain(&decoys) {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
    }

    let config = Config::load(features.config.as_deref())?;
    let mut options = config.parse_options(&features)?;
    options.combined = decoys.is_empty();
    let default_direction =
        !no_default_direction && config.conversion.default_direction.unwrap_or(true);

    info!("tandem2pin - X!Tandem to Percolator");
    info!("===================================");
    info!("Targets: {}", targets.len());
    info!("Decoys:  {}", decoys.len());
    match &output {
        Some(path) => info!("Output:  {}", path.display()),
        None => info!("Output:  <stdout>"),
    }
    if options.combined {
        info!("Combined target/decoy input, decoy pattern '{}'", options.decoy_pattern);
    }
    info!("Enzyme: {}", options.enzyme);
    info!("Hits per spectrum: {}", options.hits_per_spectrum);

    let converter = TandemConverter::new(options).context("Invalid conversion options")?;

    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = PinWriter::new(sink).with_default_direction(default_direction);

    let stats = converter
        .convert_all(&targets, &decoys, &mut writer)
        .context("Conversion failed")?;
    writer.finish().context("Failed to write .pin output")?;

    info!("Conversion complete!");
    info!("  Files:   {}", stats.files);
    info!("  Spectra: {}", stats.spectra);
    info!("  PSMs:    {} ({} targets, {} decoys)", stats.psms, stats.targets, stats.decoys);

    Ok(())
}
