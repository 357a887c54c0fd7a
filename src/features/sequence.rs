//! Features derived from the peptide sequence
//!
//! All helpers take the flanked form `N.PEPTIDE.C`, where the peptide may
//! still carry modification symbols.

/// Canonical amino acids, in amino-acid frequency feature order
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Flank character used at protein termini
pub const NO_FLANK: char = '-';

pub fn is_canonical(residue: char) -> bool {
    AMINO_ACIDS.contains(residue)
}

/// Build the flanked sequence `N.PEPTIDE.C`
pub fn flanked(flank_n: char, peptide: &str, flank_c: char) -> String {
    format!("{flank_n}.{peptide}.{flank_c}")
}

/// Characters between the flanks of a flanked sequence
///
/// Flanks are single characters, not necessarily ASCII.
fn core(flanked: &str) -> Vec<char> {
    let chars: Vec<char> = flanked.chars().collect();
    if chars.len() < 4 {
        return Vec::new();
    }
    chars[2..chars.len() - 2].to_vec()
}

/// Remove every non-canonical character
pub fn strip_modifications(sequence: &str) -> String {
    sequence.chars().filter(|c| is_canonical(*c)).collect()
}

/// Number of canonical residues between the flanks
pub fn peptide_length(flanked: &str) -> usize {
    core(flanked).into_iter().filter(|c| is_canonical(*c)).count()
}

/// Number of modification symbols between the flanks
pub fn count_ptms(flanked: &str) -> usize {
    core(flanked).into_iter().filter(|c| !is_canonical(*c)).count()
}

/// Number of deamidated N-glycosylation sites (N[mod]-X-S/T)
///
/// Decoys are reversed sequences, so the motif is read right to left.
pub fn pngasef_sites(flanked: &str, is_decoy: bool) -> usize {
    let seq = core(flanked);
    let mut sites = 0;

    for i in 0..seq.len() {
        if seq[i] != 'N' || i + 1 >= seq.len() || is_canonical(seq[i + 1]) {
            continue;
        }
        let found = if is_decoy {
            // S/T - X - N[mod], read backwards
            previous_residue(&seq, i)
                .and_then(|x| previous_residue(&seq, x))
                .is_some_and(|st| matches!(seq[st], 'S' | 'T'))
        } else {
            next_residue(&seq, i + 1)
                .and_then(|x| next_residue(&seq, x))
                .is_some_and(|st| matches!(seq[st], 'S' | 'T'))
        };
        if found {
            sites += 1;
        }
    }
    sites
}

fn next_residue(seq: &[char], from: usize) -> Option<usize> {
    (from + 1..seq.len()).find(|&j| is_canonical(seq[j]))
}

fn previous_residue(seq: &[char], from: usize) -> Option<usize> {
    (0..from).rev().find(|&j| is_canonical(seq[j]))
}

/// Relative frequency of each canonical residue between the flanks
///
/// Frequencies are relative to all characters between the flanks,
/// modification symbols included.
pub fn aa_frequencies(flanked: &str) -> Vec<f64> {
    let seq = core(flanked);
    let mut counts = vec![0.0; AMINO_ACIDS.len()];
    for residue in &seq {
        if let Some(pos) = AMINO_ACIDS.find(*residue) {
            counts[pos] += 1.0;
        }
    }
    if !seq.is_empty() {
        let len = seq.len() as f64;
        counts.iter_mut().for_each(|c| *c /= len);
    }
    counts
}
