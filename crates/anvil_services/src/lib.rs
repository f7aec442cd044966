//! Anvil Services Layer
//!
//! Process-level setup shared by the runtime and tools: settings and logging.

pub mod logging;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read settings '{}': {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings '{}': {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to install logger: {0}")]
    Logging(String),
}
