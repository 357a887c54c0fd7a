use std::path::PathBuf;

/// Errors that can occur while reading an X!Tandem result file
///
/// Every variant is fatal for the file being processed. PSMs that were
/// already handed to a sink before the error are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum TandemError {
    /// The input file could not be opened or read
    #[error("Cannot access file {}: {source}", path.display())]
    FileAccess {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while streaming the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Document does not follow the bioml layout
    #[error("Invalid X!Tandem document: {0}")]
    InvalidStructure(String),

    /// An attribute is present but cannot be interpreted
    #[error("Invalid value {value:?} for attribute '{attribute}' on <{element}>")]
    InvalidAttributeValue {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// UTF-8 encoding error in attribute content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// A spectrum group has no precursor charge
    #[error("Missing charge (attribute z) on spectrum group {}", spectrum.as_deref().unwrap_or("<unknown>"))]
    MissingCharge { spectrum: Option<String> },

    /// The file contains no spectrum groups
    #[error("The file {file} does not contain any spectrum records")]
    EmptyFile { file: String },

    /// Required XML attribute is missing
    #[error("Missing required attribute '{attribute}' on <{element}> in spectrum {spectrum}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        spectrum: String,
    },

    /// A sequence symbol has no entry in the PTM scheme
    #[error("Peptide sequence {peptide} contains modification '{symbol}' that is not in the PTM scheme")]
    UnresolvedModification { peptide: String, symbol: char },

    /// A positional modification lies outside the peptide's protein interval
    #[error(
        "Peptide sequence {peptide} contains modification [{modification}] at protein position \
         {position}, which is outside of the peptide interval [{start},{end}]"
    )]
    ModificationOutOfRange {
        peptide: String,
        modification: String,
        position: i64,
        start: i64,
        end: i64,
    },

    /// The sink rejected a record
    #[error("Sink error: {0}")]
    Sink(#[from] crate::sink::SinkError),
}

impl From<quick_xml::events::attributes::AttrError> for TandemError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        TandemError::XmlError(quick_xml::Error::from(e))
    }
}
