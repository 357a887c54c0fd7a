/// Errors that can occur while persisting PSMs
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error writing delimited output
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A file's feature layout differs from the one already written
    #[error("Feature schema of {file} differs from the schema of earlier inputs")]
    SchemaMismatch { file: String },

    /// A record arrived before any schema was announced
    #[error("Sink received a PSM before a feature schema")]
    NotInitialized,

    /// A record does not fit the announced schema
    #[error("PSM {id} has {actual} features, schema has {expected}")]
    FeatureCount {
        id: String,
        expected: usize,
        actual: usize,
    },
}
