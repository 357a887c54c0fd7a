use std::collections::{BTreeSet, HashMap};

use crate::tandem::{SpectrumResult, TandemError};

/// Peptide sequence to the set of protein labels reporting it, for one spectrum
#[derive(Debug, Clone, Default)]
pub struct PeptideProteinMap {
    map: HashMap<String, BTreeSet<String>>,
}

impl PeptideProteinMap {
    /// Index every domain of a spectrum group
    pub fn build(group: &SpectrumResult) -> Result<Self, TandemError> {
        let mut map: HashMap<String, BTreeSet<String>> = HashMap::new();
        for protein in &group.proteins {
            for domain in &protein.domains {
                let seq = domain.seq.as_ref().ok_or_else(|| TandemError::MissingAttribute {
                    element: "domain",
                    attribute: "seq",
                    spectrum: group.display_id(),
                })?;
                map.entry(seq.clone())
                    .or_default()
                    .insert(protein.label.clone());
            }
        }
        Ok(Self { map })
    }

    /// Proteins of a peptide, sorted by label
    pub fn proteins(&self, peptide: &str) -> Option<&BTreeSet<String>> {
        self.map.get(peptide)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
