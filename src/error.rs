// ⚠️ Error Types - Chart Relations
// Only the schema check is fatal; bad rows are skipped, never raised

use thiserror::Error;

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, RelationsError>;

#[derive(Error, Debug)]
pub enum RelationsError {
    /// Input is missing one or more of the required columns
    #[error("input missing required header(s): {missing:?}. Present: {present:?}")]
    MissingColumns {
        missing: Vec<String>,
        present: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
