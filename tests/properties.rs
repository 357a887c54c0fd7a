//! Property-based tests for feature layout invariants

use proptest::prelude::*;

use tandem_pin::converter::TandemConverter;
use tandem_pin::features::{aa_frequencies, flanked, peptide_length, AMINO_ACIDS};
use tandem_pin::options::ParseOptions;
use tandem_pin::sink::MemorySink;
use tandem_pin::tandem::IonChannel;

fn ion_attributes(channels: &[bool]) -> String {
    IonChannel::ALL
        .iter()
        .zip(channels)
        .filter(|(_, present)| **present)
        .map(|(channel, _)| {
            format!(
                r#"{}="5.0" {}="2""#,
                channel.score_attribute(),
                channel.ions_attribute()
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn document(charges: &[u32], channels: &[bool], peptides: &[String]) -> String {
    let ions = ion_attributes(channels);
    let groups: Vec<String> = charges
        .iter()
        .enumerate()
        .map(|(i, z)| {
            let domains: String = peptides
                .iter()
                .enumerate()
                .map(|(j, seq)| {
                    format!(
                        r#"<domain id="{i}.1.{j}" start="1" end="{end}" mh="900.0" delta="0.1" hyperscore="30.0" nextscore="20.0" {ions} pre="[" post="]" seq="{seq}"/>"#,
                        end = seq.len()
                    )
                })
                .collect();
            format!(
                r#"<group id="{i}" mh="901.0" z="{z}" type="model" sumI="5.0" maxI="100" fI="1.0"><protein label="sp|P{i}"><peptide>{domains}</peptide></protein></group>"#
            )
        })
        .collect();
    format!("<?xml version=\"1.0\"?>\n<bioml>{}</bioml>", groups.concat())
}

fn peptide() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(AMINO_ACIDS.chars().collect::<Vec<_>>()), 2..20)
        .prop_map(|residues| residues.into_iter().collect())
}

proptest! {
    /// Every PSM of a file carries exactly one value per schema feature
    /// and exactly one hot charge column
    #[test]
    fn test_vectors_follow_schema(
        charges in prop::collection::vec(1u32..7, 1..8),
        channels in prop::collection::vec(any::<bool>(), 6),
        peptides in prop::collection::vec(peptide(), 1..4),
        hits in 1usize..4,
        calc_aa_frequencies in any::<bool>(),
    ) {
        let options = ParseOptions {
            hits_per_spectrum: hits,
            calc_ptms: true,
            calc_aa_frequencies,
            ..Default::default()
        };
        let converter = TandemConverter::new(options).unwrap();
        let mut sink = MemorySink::new();
        let xml = document(&charges, &channels, &peptides);
        let stats = converter.convert_bytes("prop", xml.as_bytes(), false, &mut sink).unwrap();

        prop_assert_eq!(stats.spectra, charges.len());
        let schema = &sink.schemas[0].1;
        let min = *charges.iter().min().unwrap();
        let max = *charges.iter().max().unwrap();
        let charge_columns: Vec<usize> = (min..=max)
            .map(|z| schema.index_of(&format!("Charge{z}")).unwrap())
            .collect();

        for (channel, present) in IonChannel::ALL.iter().zip(&channels) {
            prop_assert_eq!(schema.index_of(&channel.feature_name()).is_some(), *present);
        }
        for psm in sink.records() {
            prop_assert_eq!(psm.features.len(), schema.len());
            let hot: f64 = charge_columns.iter().map(|i| psm.features[*i]).sum();
            prop_assert_eq!(hot, 1.0);
            prop_assert!(psm.features.iter().all(|v| v.is_finite()));
        }
    }

    /// Residue frequencies of an unmodified peptide sum to one
    #[test]
    fn test_aa_frequencies_sum(seq in peptide()) {
        let full = flanked('K', &seq, '-');
        prop_assert_eq!(peptide_length(&full), seq.len());
        let total: f64 = aa_frequencies(&full).iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
