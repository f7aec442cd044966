//! Asset identifiers and lookup keys

use std::fmt;
use std::path::{Path, PathBuf};

/// Registry-assigned asset identifier (never reused within a registry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a lookup searches for: a filename or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Path(String),
    Id(AssetId),
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Path(path) => write!(f, "{path}"),
            AssetKey::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for AssetKey {
    fn from(value: &str) -> Self {
        AssetKey::Path(normalize_filename(value))
    }
}

impl From<String> for AssetKey {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&String> for AssetKey {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&Path> for AssetKey {
    fn from(value: &Path) -> Self {
        Self::from(value.to_string_lossy().as_ref())
    }
}

impl From<&PathBuf> for AssetKey {
    fn from(value: &PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<AssetId> for AssetKey {
    fn from(value: AssetId) -> Self {
        AssetKey::Id(value)
    }
}

/// Canonical spelling of a filename used as a cache key.
///
/// Backslashes become `/`, repeated separators collapse and `.` segments are
/// dropped. `textures\\hero.png`, `./textures/hero.png` and
/// `textures//hero.png` all map to `textures/hero.png`.
pub fn normalize_filename(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if unified.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("textures\\hero.png"), "textures/hero.png");
        assert_eq!(normalize_filename("./textures//hero.png"), "textures/hero.png");
        assert_eq!(normalize_filename("/abs/./x.obj"), "/abs/x.obj");
        assert_eq!(normalize_filename("  "), "");
    }

    #[test]
    fn test_key_conversions() {
        let from_path: AssetKey = Path::new("a/./b.png").into();
        assert_eq!(from_path, AssetKey::Path("a/b.png".into()));
        assert_eq!(AssetKey::from(AssetId(7)).to_string(), "#7");
    }
}
