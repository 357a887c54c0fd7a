use std::collections::HashSet;

use log::{debug, warn};

use super::{Modification, Peptide, PeptideProteinMap, ProteinOccurrence, PsmRecord};
use crate::features::{
    aa_frequencies, count_ptms, flanked, is_canonical, peptide_length, pngasef_sites,
    DetectedCapabilities, FeatureSchema, NO_FLANK,
};
use crate::options::ParseOptions;
use crate::sink::PsmSink;
use crate::tandem::{Domain, SpectrumResult, TandemError};

/// Counts for one processed spectrum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpectrumStats {
    pub psms: usize,
    pub decoys: usize,
}

/// Validated precursor attributes of a spectrum group
struct Precursor {
    spectrum_id: u32,
    mass: f64,
    charge: u32,
}

/// Turns the domains of a spectrum group into PSM records
///
/// Holds everything that is fixed for a file: its id, the options and the
/// detected capabilities with the schema derived from them.
pub struct PsmBuilder<'a> {
    file_id: &'a str,
    options: &'a ParseOptions,
    capabilities: &'a DetectedCapabilities,
    schema: &'a FeatureSchema,
}

impl<'a> PsmBuilder<'a> {
    pub fn new(
        file_id: &'a str,
        options: &'a ParseOptions,
        capabilities: &'a DetectedCapabilities,
        schema: &'a FeatureSchema,
    ) -> Self {
        Self {
            file_id,
            options,
            capabilities,
            schema,
        }
    }

    /// Build and save the PSMs of one spectrum group
    ///
    /// Keeps the first `hits_per_spectrum` distinct sequences in document
    /// order. Records are handed to the sink as soon as they are built, so
    /// an error part way through leaves earlier records saved.
    pub fn emit_spectrum<S: PsmSink + ?Sized>(
        &self,
        group: &SpectrumResult,
        is_decoy: bool,
        sink: &mut S,
    ) -> Result<SpectrumStats, TandemError> {
        let precursor = self.precursor(group)?;
        let peptide_proteins = PeptideProteinMap::build(group)?;
        if peptide_proteins.is_empty() {
            warn!("Spectrum {} has no peptide candidates", precursor.spectrum_id);
        }

        let mut stats = SpectrumStats::default();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rank = 1;

        for protein in &group.proteins {
            for domain in &protein.domains {
                let seq = domain.seq.as_deref().ok_or_else(|| TandemError::MissingAttribute {
                    element: "domain",
                    attribute: "seq",
                    spectrum: precursor.spectrum_id.to_string(),
                })?;
                if rank > self.options.hits_per_spectrum {
                    break;
                }
                if !seen.insert(seq) {
                    debug!(
                        "Spectrum {}: duplicate sequence {} skipped",
                        precursor.spectrum_id, seq
                    );
                    continue;
                }

                let proteins = peptide_proteins
                    .proteins(seq)
                    .map(|set| set.iter().map(String::as_str).collect::<Vec<_>>())
                    .unwrap_or_default();
                let psm = self.build_psm(&precursor, domain, seq, &proteins, rank, is_decoy)?;
                if psm.is_decoy {
                    stats.decoys += 1;
                }
                stats.psms += 1;
                sink.save(precursor.spectrum_id, psm)?;
                rank += 1;
            }
        }

        Ok(stats)
    }

    fn precursor(&self, group: &SpectrumResult) -> Result<Precursor, TandemError> {
        let spectrum = group.display_id();
        let missing = |attribute| TandemError::MissingAttribute {
            element: "group",
            attribute,
            spectrum: spectrum.clone(),
        };
        let id = group.id.as_deref().ok_or_else(|| missing("id"))?;
        let mass = group.mh.ok_or_else(|| missing("mh"))?;
        let charge = group.z.ok_or_else(|| missing("z"))?;
        group.sum_i.ok_or_else(|| missing("sumI"))?;
        group.max_i.ok_or_else(|| missing("maxI"))?;
        group.f_i.ok_or_else(|| missing("fI"))?;

        let spectrum_id = id
            .trim()
            .parse()
            .map_err(|_| TandemError::InvalidAttributeValue {
                element: "group",
                attribute: "id",
                value: id.to_string(),
            })?;
        Ok(Precursor {
            spectrum_id,
            mass,
            charge,
        })
    }

    fn build_psm(
        &self,
        precursor: &Precursor,
        domain: &Domain,
        seq: &str,
        proteins: &[&str],
        rank: usize,
        is_decoy: bool,
    ) -> Result<PsmRecord, TandemError> {
        let missing = |attribute| TandemError::MissingAttribute {
            element: "domain",
            attribute,
            spectrum: precursor.spectrum_id.to_string(),
        };
        let calculated_mass = domain.mh.ok_or_else(|| missing("mh"))?;
        let mass_diff = domain.delta.ok_or_else(|| missing("delta"))?;
        let hyperscore = domain.hyperscore.ok_or_else(|| missing("hyperscore"))?;
        let next_hyperscore = domain.nextscore.ok_or_else(|| missing("nextscore"))?;

        let is_decoy = if self.options.combined {
            proteins.iter().any(|p| self.options.is_decoy_label(p))
        } else {
            is_decoy
        };

        let flank_n = match domain.pre.as_deref().and_then(|pre| pre.chars().last()) {
            Some('[') | None => NO_FLANK,
            Some(c) => c,
        };
        let flank_c = match domain.post.as_deref().and_then(|post| post.chars().next()) {
            Some(']') | None => NO_FLANK,
            Some(c) => c,
        };
        let full_peptide = flanked(flank_n, seq, flank_c);

        let peptide = self.resolve_modifications(precursor.spectrum_id, domain, seq)?;
        let length = peptide.sequence.len();
        if length == 0 {
            return Err(TandemError::InvalidAttributeValue {
                element: "domain",
                attribute: "seq",
                value: seq.to_string(),
            });
        }

        let mut features = Vec::with_capacity(self.schema.len());
        features.push(hyperscore);
        features.push(hyperscore - next_hyperscore);
        for channel in self.capabilities.channels() {
            let ions = domain.channel(channel).and_then(|r| r.ions).unwrap_or(0);
            features.push(f64::from(ions) / length as f64);
        }
        features.push(precursor.mass);
        features.push(mass_diff);
        features.push(mass_diff.abs());
        features.push(peptide_length(&full_peptide) as f64);
        for charge in self.capabilities.charges() {
            features.push(if charge == precursor.charge { 1.0 } else { 0.0 });
        }
        if let Some(enzyme) = self.options.enzyme.rule() {
            let stripped: Vec<char> = flanked(flank_n, &peptide.sequence, flank_c)
                .chars()
                .collect();
            let n = stripped.len();
            features.push(bool_feature(enzyme.is_enzymatic(stripped[0], stripped[2])));
            features.push(bool_feature(enzyme.is_enzymatic(stripped[n - 3], stripped[n - 1])));
            features.push(enzyme.count_enzymatic(&peptide.sequence) as f64);
        }
        if self.options.calc_ptms {
            features.push(count_ptms(&full_peptide) as f64);
        }
        if self.options.pngasef {
            features.push(pngasef_sites(&full_peptide, is_decoy) as f64);
        }
        if self.options.calc_aa_frequencies {
            features.extend(aa_frequencies(&full_peptide));
        }
        debug_assert_eq!(
            features.len(),
            self.schema.len(),
            "feature vector does not follow the file schema"
        );

        let occurrences = proteins
            .iter()
            .map(|protein| ProteinOccurrence {
                protein: protein.to_string(),
                flank_n,
                flank_c,
            })
            .collect();

        Ok(PsmRecord {
            id: format!(
                "{}_{:.4}_{}_{}_{}",
                self.file_id, precursor.mass, precursor.spectrum_id, precursor.charge, rank
            ),
            spectrum_id: precursor.spectrum_id,
            is_decoy,
            observed_mass: precursor.mass,
            calculated_mass,
            charge: precursor.charge,
            features,
            peptide,
            occurrences,
        })
    }

    /// Strip scheme symbols from the sequence and collect all modifications
    fn resolve_modifications(
        &self,
        spectrum_id: u32,
        domain: &Domain,
        seq: &str,
    ) -> Result<Peptide, TandemError> {
        let mut peptide = Peptide {
            sequence: String::with_capacity(seq.len()),
            modifications: Vec::new(),
        };

        for symbol in seq.chars() {
            if is_canonical(symbol) {
                peptide.sequence.push(symbol);
                continue;
            }
            let accession = self.options.ptm_scheme.get(&symbol).ok_or_else(|| {
                TandemError::UnresolvedModification {
                    peptide: seq.to_string(),
                    symbol,
                }
            })?;
            peptide.modifications.push(Modification::Scheme {
                position: peptide.sequence.len(),
                symbol,
                accession: *accession,
            });
        }

        if domain.modifications.is_empty() {
            return Ok(peptide);
        }

        let missing = |attribute| TandemError::MissingAttribute {
            element: "domain",
            attribute,
            spectrum: spectrum_id.to_string(),
        };
        let start = domain.start.ok_or_else(|| missing("start"))?;
        let end = domain.end.ok_or_else(|| missing("end"))?;
        for aa in &domain.modifications {
            if aa.at < start || aa.at > end {
                return Err(TandemError::ModificationOutOfRange {
                    peptide: peptide.sequence.clone(),
                    modification: aa.modified.clone(),
                    position: aa.at,
                    start,
                    end,
                });
            }
            peptide.modifications.push(Modification::Free {
                position: (aa.at - start + 1) as usize,
                residue: aa.residue,
                mass: aa.modified.clone(),
            });
        }

        Ok(peptide)
    }
}

fn bool_feature(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
