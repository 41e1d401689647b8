use std::io;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Parse,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch {source_path}: {reason}")]
    Fetch { source_path: String, reason: String },

    #[error("Failed to fetch {source_path}: HTTP {status}")]
    Status { source_path: String, status: u16 },

    #[error("Failed to parse {source_path}: {error}")]
    Parse {
        source_path: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("{source_path} must be an array")]
    NotArray { source_path: String },
}

impl LoadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::Fetch { .. } | LoadError::Status { .. } => FailureKind::Fetch,
            LoadError::Parse { .. } | LoadError::NotArray { .. } => FailureKind::Parse,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file could not be read: {0}")]
    Read(#[from] io::Error),

    #[error("Settings structure is incorrect: {0}")]
    Malformed(#[from] serde_json::Error),
}
