//! Error types for the drug index.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DrugIndexError.
pub type Result<T> = std::result::Result<T, DrugIndexError>;

/// Errors that can occur while building, querying or
/// rendering the drug index.
#[derive(Debug, Error)]
pub enum DrugIndexError {
    // Key errors
    #[error("Drug name is blank")]
    EmptyKey,

    #[error("Drug '{query}' not found")]
    NotFound { query: String },

    // Presentation errors
    #[error("Failed to write tree diagram to {}: {source}", path.display())]
    RenderFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Data source errors
    #[error("Data source error: {0}")]
    DataSource(#[from] polars::prelude::PolarsError),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
