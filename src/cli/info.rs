use anyhow::{Context, Result};
use std::path::PathBuf;

use tandem_pin::converter::TandemConverter;
use tandem_pin::features::FeatureSchema;

use super::{Config, FeatureArgs};

/// Display the detected capabilities and feature layout of a result file
pub fn run(file: PathBuf, json: bool, features: FeatureArgs) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let options = Config::load(features.config.as_deref())?.parse_options(&features)?;
    let converter = TandemConverter::new(options).context("Invalid conversion options")?;
    let capabilities = converter
        .detect(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let schema = FeatureSchema::build(&capabilities, converter.options());
    let channels: Vec<String> = capabilities
        .channels()
        .map(|c| c.letter().to_string())
        .collect();

    if json {
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "channels": channels,
            "min_charge": capabilities.min_charge,
            "max_charge": capabilities.max_charge,
            "features": schema.features(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("X!Tandem File Information");
    println!("=========================");
    println!("File: {}", file.display());
    println!();

    println!("Capabilities:");
    println!("  Ion channels: {}", channels.join(", "));
    println!(
        "  Charge range: {}..={}",
        capabilities.min_charge, capabilities.max_charge
    );
    println!();

    println!("Features ({}):", schema.len());
    for (i, feature) in schema.features().iter().enumerate() {
        println!("  {:3}. {} (default {})", i + 1, feature.name, feature.default);
    }

    Ok(())
}
