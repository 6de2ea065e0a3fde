//! Error type shared by every pipeline stage.
//!
//! Failures that would corrupt generated metadata are variants here and stop
//! the run. Schema compilation problems are not: they have their own
//! [`SchemaError`](crate::schema::SchemaError) and degrade to `unknown`.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid package glob '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rule '{rule}' has no entry file (tried {tried})")]
    MissingEntry { rule: String, tried: String },

    #[error("invalid descriptor for rule '{rule}': {message}")]
    Descriptor { rule: String, message: String },

    #[error("invalid package manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}
