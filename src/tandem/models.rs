//! Data models for X!Tandem result structures
//!
//! These models mirror the `group`/`protein`/`peptide`/`domain` nesting of
//! a bioml document. Attributes are kept optional where the document may
//! omit them; required-ness is enforced by the consumers.

use serde::Serialize;

/// Fragment ion series reported by X!Tandem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IonChannel {
    A,
    B,
    C,
    X,
    Y,
    Z,
}

impl IonChannel {
    /// All channels, in feature order
    pub const ALL: [IonChannel; 6] = [
        IonChannel::A,
        IonChannel::B,
        IonChannel::C,
        IonChannel::X,
        IonChannel::Y,
        IonChannel::Z,
    ];

    /// Position of the channel in [`IonChannel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            IonChannel::A => 'a',
            IonChannel::B => 'b',
            IonChannel::C => 'c',
            IonChannel::X => 'x',
            IonChannel::Y => 'y',
            IonChannel::Z => 'z',
        }
    }

    /// Domain attribute holding the channel score, e.g. `y_score`
    pub fn score_attribute(self) -> &'static str {
        match self {
            IonChannel::A => "a_score",
            IonChannel::B => "b_score",
            IonChannel::C => "c_score",
            IonChannel::X => "x_score",
            IonChannel::Y => "y_score",
            IonChannel::Z => "z_score",
        }
    }

    /// Domain attribute holding the matched ion count, e.g. `y_ions`
    pub fn ions_attribute(self) -> &'static str {
        match self {
            IonChannel::A => "a_ions",
            IonChannel::B => "b_ions",
            IonChannel::C => "c_ions",
            IonChannel::X => "x_ions",
            IonChannel::Y => "y_ions",
            IonChannel::Z => "z_ions",
        }
    }

    /// Name of the ion-fraction feature derived from this channel
    pub fn feature_name(self) -> String {
        format!("frac_ion_{}", self.letter())
    }
}

/// Score and matched-ion count of one ion series
///
/// Built when the domain carries either attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelReading {
    pub score: Option<f64>,
    pub ions: Option<u32>,
}

impl ChannelReading {
    /// Both score and ion count present; only complete readings mark a
    /// channel as detected
    pub fn is_complete(&self) -> bool {
        self.score.is_some() && self.ions.is_some()
    }
}

/// Explicit residue modification attached to a domain (`<aa>` element)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AaModification {
    /// Residue that was modified
    pub residue: Option<char>,
    /// Absolute position in the protein
    pub at: i64,
    /// Modification mass as written in the document
    pub modified: String,
}

/// One candidate alignment of a peptide to a spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    pub id: Option<String>,
    pub seq: Option<String>,
    /// Calculated peptide mass (plus a proton)
    pub mh: Option<f64>,
    /// Observed minus calculated mass
    pub delta: Option<f64>,
    pub hyperscore: Option<f64>,
    pub nextscore: Option<f64>,
    /// Residues preceding the peptide, `[` at the protein N-terminus
    pub pre: Option<String>,
    /// Residues following the peptide, `]` at the protein C-terminus
    pub post: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    /// Per-channel readings, indexed by [`IonChannel::index`]
    pub channels: [Option<ChannelReading>; 6],
    pub modifications: Vec<AaModification>,
}

impl Domain {
    pub fn channel(&self, channel: IonChannel) -> Option<&ChannelReading> {
        self.channels[channel.index()].as_ref()
    }
}

/// A protein hit and the peptide candidates it contributed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinMatch {
    /// Protein label, restricted to printable ASCII
    pub label: String,
    pub domains: Vec<Domain>,
}

/// All identifications for one spectrum (`<group type="model">`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumResult {
    pub id: Option<String>,
    /// Precursor mass (plus a proton)
    pub mh: Option<f64>,
    /// Precursor charge
    pub z: Option<u32>,
    /// log10 of the summed fragment intensities
    pub sum_i: Option<f64>,
    /// Maximum fragment intensity
    pub max_i: Option<f64>,
    /// Intensity normalisation factor
    pub f_i: Option<f64>,
    pub proteins: Vec<ProteinMatch>,
}

impl SpectrumResult {
    /// Iterate over every domain of every protein, in document order
    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.proteins.iter().flat_map(|p| p.domains.iter())
    }

    /// True when the group carries at least one domain
    pub fn has_domains(&self) -> bool {
        self.domains().next().is_some()
    }

    /// Spectrum id for diagnostics
    pub fn display_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| "<unknown>".to_string())
    }
}

/// Keep only printable ASCII characters of a protein label
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}
