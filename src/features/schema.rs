use serde::Serialize;

use super::capabilities::DetectedCapabilities;
use super::sequence::AMINO_ACIDS;
use crate::options::ParseOptions;

/// Name and default value of one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDescription {
    pub name: String,
    pub default: f64,
}

/// Ordered feature layout shared by every PSM of a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSchema {
    features: Vec<FeatureDescription>,
}

/// Initial weights for the core X!Tandem features
const DEFAULTS: &[(&str, f64)] = &[
    ("hyperscore", 0.8),
    ("deltaScore", 1.9),
    ("frac_ion_b", 0.0),
    ("frac_ion_y", 0.0),
    ("Mass", 0.0),
    ("dM", 0.0),
    ("absdM", -0.03),
    ("PepLen", 0.0),
    ("enzN", 0.0),
    ("enzC", 0.0),
    ("enzInt", 0.0),
];

impl FeatureSchema {
    /// Derive the feature layout from a file's capabilities and the options
    pub fn build(capabilities: &DetectedCapabilities, options: &ParseOptions) -> Self {
        let mut schema = Self {
            features: Vec::new(),
        };

        schema.push("hyperscore");
        schema.push("deltaScore");
        for channel in capabilities.channels() {
            schema.push(&channel.feature_name());
        }
        schema.push("Mass");
        schema.push("dM");
        schema.push("absdM");
        schema.push("PepLen");
        for charge in capabilities.charges() {
            schema.push(&format!("Charge{charge}"));
        }
        if options.enzyme.rule().is_some() {
            schema.push("enzN");
            schema.push("enzC");
            schema.push("enzInt");
        }
        if options.calc_ptms {
            schema.push("ptm");
        }
        if options.pngasef {
            schema.push("PNGaseF");
        }
        if options.calc_aa_frequencies {
            for aa in AMINO_ACIDS.chars() {
                schema.push(&format!("{aa}-Freq"));
            }
        }
        schema
    }

    fn push(&mut self, name: &str) {
        let default = DEFAULTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
            .unwrap_or(0.0);
        self.features.push(FeatureDescription {
            name: name.to_string(),
            default,
        });
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[FeatureDescription] {
        &self.features
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Position of a feature by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enzyme::EnzymeKind;
    use crate::tandem::IonChannel;

    #[test]
    fn test_minimal_schema() {
        let caps = DetectedCapabilities::new(&[IonChannel::Y, IonChannel::B], 2, 3);
        let schema = FeatureSchema::build(&caps, &ParseOptions::default());
        let names: Vec<_> = schema.names().collect();
        assert_eq!(
            names,
            vec![
                "hyperscore",
                "deltaScore",
                "frac_ion_b",
                "frac_ion_y",
                "Mass",
                "dM",
                "absdM",
                "PepLen",
                "Charge2",
                "Charge3",
                "enzN",
                "enzC",
                "enzInt",
            ]
        );
        assert_eq!(schema.features()[6].default, -0.03);
        assert_eq!(schema.features()[1].default, 1.9);
    }

    #[test]
    fn test_optional_feature_blocks() {
        let caps = DetectedCapabilities::new(&[IonChannel::A], 1, 1);
        let options = ParseOptions {
            enzyme: EnzymeKind::NoEnzyme,
            calc_ptms: true,
            pngasef: true,
            calc_aa_frequencies: true,
            ..Default::default()
        };
        let schema = FeatureSchema::build(&caps, &options);
        assert_eq!(schema.len(), 2 + 1 + 4 + 1 + 1 + 1 + 20);
        assert_eq!(schema.index_of("frac_ion_a"), Some(2));
        assert_eq!(schema.index_of("enzN"), None);
        assert_eq!(schema.index_of("ptm"), Some(8));
        assert_eq!(schema.index_of("PNGaseF"), Some(9));
        assert_eq!(schema.index_of("A-Freq"), Some(10));
        assert_eq!(schema.index_of("Y-Freq"), Some(29));
    }
}
