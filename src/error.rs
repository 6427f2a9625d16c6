//! Load-time errors
//!
//! Everything that can fail happens before a session starts. Once the world
//! is built the simulation is total.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{path}: missing {what}")]
    MissingRecord { path: PathBuf, what: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing asset for {sprite}: {path}")]
    MissingAsset { sprite: String, path: PathBuf },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
