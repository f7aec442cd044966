use crate::AssetKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by loaders and the asset registry.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset '{}': {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("invalid asset data: {reason}")]
    InvalidData { reason: String },

    #[error("asset '{key}' is registered as a {found}, not a {expected}")]
    TypeMismatch {
        key: String,
        expected: AssetKind,
        found: AssetKind,
    },

    #[error("no asset registered for '{key}'")]
    NotFound { key: String },

    #[error("asset filename is empty")]
    EmptyFilename,
}

impl AssetError {
    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AssetError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the failures a loader can produce (unreadable or corrupt file).
    pub fn is_load_failure(&self) -> bool {
        matches!(self, AssetError::Io { .. } | AssetError::Decode { .. })
    }
}
