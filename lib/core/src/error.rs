use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load dataset: {0}")]
    DatasetLoad(String),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Cache artifact {artifact} is corrupt: {reason}")]
    CacheCorrupt { artifact: String, reason: String },

    #[error("No game could be found by the name: {0}")]
    NotFound(String),

    #[error("Invalid similarity matrix: expected {expected} entries, got {actual}")]
    InvalidMatrix { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn cache_corrupt(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Error::CacheCorrupt {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error should end an interactive session
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
