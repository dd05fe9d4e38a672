// Source-level failures: the only fatal errors in the system.
// Malformed billed-amount cells are NOT errors - the cleaner degrades
// them to zero instead of failing the pipeline.

#[derive(Debug, Clone)]
pub enum SourceError {
    /// The spreadsheet file or worksheet could not be read.
    SourceUnavailable { path: String, reason: String },
    /// A required column header is absent from the source.
    MissingColumn { column: String },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::SourceUnavailable { path, reason } => {
                write!(f, "source unavailable: {}: {}", path, reason)
            }
            SourceError::MissingColumn { column } => {
                write!(f, "required column '{}' not found in source", column)
            }
        }
    }
}

impl std::error::Error for SourceError {}
