//! Asset settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory relative filenames are loaded from.
    pub root: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}
