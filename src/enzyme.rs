//! Cleavage rules of digestion enzymes
//!
//! An [`Enzyme`] answers whether the bond between two residues is one the
//! enzyme cleaves. `-` stands for a protein terminus and always counts as
//! a cleavage site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::features::NO_FLANK;

/// Cleavage rule consulted for the enzyme-specificity features
pub trait Enzyme {
    /// True when the enzyme cleaves between residues `n` and `c`
    fn is_enzymatic(&self, n: char, c: char) -> bool;

    /// Number of cleavable bonds inside `peptide`
    fn count_enzymatic(&self, peptide: &str) -> usize {
        let residues: Vec<char> = peptide.chars().collect();
        residues
            .windows(2)
            .filter(|pair| self.is_enzymatic(pair[0], pair[1]))
            .count()
    }
}

/// Built-in enzymes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnzymeKind {
    /// No enzyme; enzyme features are not computed
    #[serde(rename = "no_enzyme", alias = "none")]
    NoEnzyme,
    #[default]
    Trypsin,
    /// Trypsin ignoring the proline rule
    #[serde(rename = "trypsinp")]
    TrypsinP,
    Chymotrypsin,
    Elastase,
    LysC,
    LysN,
    ArgC,
    AspN,
    Thermolysin,
    Pepsin,
    ProlineEndopeptidase,
    Cnbr,
    Clostripain,
    AlphaLyticProtease,
}

impl EnzymeKind {
    pub const ALL: [EnzymeKind; 15] = [
        EnzymeKind::NoEnzyme,
        EnzymeKind::Trypsin,
        EnzymeKind::TrypsinP,
        EnzymeKind::Chymotrypsin,
        EnzymeKind::Elastase,
        EnzymeKind::LysC,
        EnzymeKind::LysN,
        EnzymeKind::ArgC,
        EnzymeKind::AspN,
        EnzymeKind::Thermolysin,
        EnzymeKind::Pepsin,
        EnzymeKind::ProlineEndopeptidase,
        EnzymeKind::Cnbr,
        EnzymeKind::Clostripain,
        EnzymeKind::AlphaLyticProtease,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnzymeKind::NoEnzyme => "no_enzyme",
            EnzymeKind::Trypsin => "trypsin",
            EnzymeKind::TrypsinP => "trypsinp",
            EnzymeKind::Chymotrypsin => "chymotrypsin",
            EnzymeKind::Elastase => "elastase",
            EnzymeKind::LysC => "lys-c",
            EnzymeKind::LysN => "lys-n",
            EnzymeKind::ArgC => "arg-c",
            EnzymeKind::AspN => "asp-n",
            EnzymeKind::Thermolysin => "thermolysin",
            EnzymeKind::Pepsin => "pepsin",
            EnzymeKind::ProlineEndopeptidase => "proline-endopeptidase",
            EnzymeKind::Cnbr => "cnbr",
            EnzymeKind::Clostripain => "clostripain",
            EnzymeKind::AlphaLyticProtease => "alpha-lytic-protease",
        }
    }

    /// The cleavage rule, or `None` for [`EnzymeKind::NoEnzyme`]
    pub fn rule(self) -> Option<&'static dyn Enzyme> {
        match self {
            EnzymeKind::NoEnzyme => None,
            _ => Some(&ENZYMES[self as usize]),
        }
    }
}

impl fmt::Display for EnzymeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnzymeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "none" {
            return Ok(EnzymeKind::NoEnzyme);
        }
        EnzymeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown enzyme '{s}'"))
    }
}

/// Rule table backing [`EnzymeKind::rule`], indexed by discriminant
static ENZYMES: [Rule; 15] = [
    Rule(EnzymeKind::NoEnzyme),
    Rule(EnzymeKind::Trypsin),
    Rule(EnzymeKind::TrypsinP),
    Rule(EnzymeKind::Chymotrypsin),
    Rule(EnzymeKind::Elastase),
    Rule(EnzymeKind::LysC),
    Rule(EnzymeKind::LysN),
    Rule(EnzymeKind::ArgC),
    Rule(EnzymeKind::AspN),
    Rule(EnzymeKind::Thermolysin),
    Rule(EnzymeKind::Pepsin),
    Rule(EnzymeKind::ProlineEndopeptidase),
    Rule(EnzymeKind::Cnbr),
    Rule(EnzymeKind::Clostripain),
    Rule(EnzymeKind::AlphaLyticProtease),
];

struct Rule(EnzymeKind);

impl Enzyme for Rule {
    fn is_enzymatic(&self, n: char, c: char) -> bool {
        if n == NO_FLANK || c == NO_FLANK {
            return true;
        }
        match self.0 {
            EnzymeKind::NoEnzyme => true,
            EnzymeKind::Trypsin => matches!(n, 'K' | 'R') && c != 'P',
            EnzymeKind::TrypsinP => matches!(n, 'K' | 'R'),
            EnzymeKind::Chymotrypsin => matches!(n, 'F' | 'W' | 'Y' | 'L') && c != 'P',
            EnzymeKind::Elastase => matches!(n, 'L' | 'V' | 'A' | 'G') && c != 'P',
            EnzymeKind::LysC => n == 'K' && c != 'P',
            EnzymeKind::LysN => c == 'K',
            EnzymeKind::ArgC => n == 'R' && c != 'P',
            EnzymeKind::AspN => c == 'D',
            EnzymeKind::Thermolysin => {
                matches!(c, 'A' | 'F' | 'I' | 'L' | 'M' | 'V') && n != 'P'
            }
            EnzymeKind::Pepsin => {
                (matches!(c, 'F' | 'L' | 'W' | 'Y') || matches!(n, 'F' | 'L' | 'W' | 'Y'))
                    && n != 'R'
            }
            EnzymeKind::ProlineEndopeptidase => matches!(n, 'P' | 'A') && c != 'P',
            EnzymeKind::Cnbr => n == 'M',
            EnzymeKind::Clostripain => n == 'R',
            EnzymeKind::AlphaLyticProtease => matches!(n, 'T' | 'A' | 'S' | 'V'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trypsin_rule() {
        let trypsin = EnzymeKind::Trypsin.rule().unwrap();
        assert!(trypsin.is_enzymatic('K', 'A'));
        assert!(trypsin.is_enzymatic('R', 'G'));
        assert!(!trypsin.is_enzymatic('K', 'P'));
        assert!(!trypsin.is_enzymatic('A', 'G'));
        assert!(trypsin.is_enzymatic('-', 'M'));
        assert!(trypsin.is_enzymatic('K', '-'));
    }

    #[test]
    fn test_count_enzymatic() {
        let trypsin = EnzymeKind::Trypsin.rule().unwrap();
        assert_eq!(trypsin.count_enzymatic("PEPKTIDER"), 1);
        assert_eq!(trypsin.count_enzymatic("AKPRAKA"), 2);
        assert_eq!(trypsin.count_enzymatic("A"), 0);
    }

    #[test]
    fn test_rule_table_matches_kind() {
        for kind in EnzymeKind::ALL {
            assert_eq!(ENZYMES[kind as usize].0, kind);
        }
        assert!(EnzymeKind::NoEnzyme.rule().is_none());
    }

    #[test]
    fn test_parse_enzyme_names() {
        assert_eq!("Trypsin".parse::<EnzymeKind>().unwrap(), EnzymeKind::Trypsin);
        assert_eq!("lys-c".parse::<EnzymeKind>().unwrap(), EnzymeKind::LysC);
        assert_eq!("none".parse::<EnzymeKind>().unwrap(), EnzymeKind::NoEnzyme);
        assert!("papain".parse::<EnzymeKind>().is_err());
    }
}
