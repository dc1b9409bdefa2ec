//! Error types for catalog construction and queries.

use thiserror::Error;

/// Boxed error reported by a record source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ForageError {
    /// A query or configuration argument is outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The raw record source could not be read. Fatal to the build step only.
    #[error("Record source failed: {0}")]
    Source(#[source] SourceError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ForageError {
    /// Wrap a collaborator failure.
    pub fn from_source<E>(err: E) -> Self
    where
        E: Into<SourceError>,
    {
        ForageError::Source(err.into())
    }
}

impl From<serde_json::Error> for ForageError {
    fn from(err: serde_json::Error) -> Self {
        ForageError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForageError>;
