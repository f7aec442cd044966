//! The asset registry
//!
//! Cache key is `(normalized filename, owner)`. Requests with the same key get
//! the same instance; the same filename under another owner is loaded again as
//! an independent copy. Entries live until `destroy` or `destroy_all`; there is
//! no eviction and no reference counting.

use crate::{
    normalize_filename, AnyAsset, Asset, AssetError, AssetHandle, AssetId, AssetKey,
    AssetSettings, Owner,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

static GLOBAL: Lazy<AssetManager> = Lazy::new(|| AssetManager::new(AssetSettings::default()));

/// Diagnostic counters
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub load_failures: u64,
    pub destroyed: u64,
}

struct Entry {
    id: AssetId,
    /// Empty for raw-constructed assets; those never match a filename lookup.
    filename: String,
    owner: Owner,
    asset: AnyAsset,
}

impl Entry {
    fn matches(&self, key: &AssetKey) -> bool {
        match key {
            AssetKey::Path(path) => !path.is_empty() && self.filename == *path,
            AssetKey::Id(id) => self.id == *id,
        }
    }
}

struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
    stats: CacheStats,
}

impl Registry {
    /// `Owner::NONE` matches any owner.
    fn find(&self, key: &AssetKey, owner: Owner) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.matches(key) && (owner.is_none() || e.owner == owner))
    }

    /// Exact owner match; `Owner::NONE` is its own bucket here.
    fn find_exact(&self, filename: &str, owner: Owner) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| !filename.is_empty() && e.filename == filename && e.owner == owner)
    }

    fn register<T: Asset>(&mut self, filename: String, owner: Owner, asset: T) -> AssetHandle<T> {
        let id = AssetId(self.next_id);
        self.next_id += 1;

        let handle = AssetHandle::new(id, asset);
        let kind = T::KIND;
        tracing::debug!(%id, %kind, filename = %filename, %owner, "registered asset");
        self.entries.push(Entry {
            id,
            filename,
            owner,
            asset: T::into_any(handle.clone()),
        });
        handle
    }

    fn remove(&mut self, instance: *const ()) -> Option<Entry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.asset.instance_ptr() == instance)?;
        let entry = self.entries.remove(idx);
        self.stats.destroyed += 1;
        Some(entry)
    }
}

/// Loads, finds and destroys assets.
///
/// Every operation takes one registry lock, loads included, so concurrent
/// `create` calls for the same key cannot register two copies.
///
/// Only use [`find`](Self::find) when the asset is known to exist; use
/// [`create`](Self::create) otherwise.
pub struct AssetManager {
    root: PathBuf,
    registry: Mutex<Registry>,
}

impl AssetManager {
    pub fn new(settings: AssetSettings) -> Self {
        Self {
            root: settings.root,
            registry: Mutex::new(Registry {
                entries: Vec::new(),
                next_id: 1,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Process-wide registry, created on first use.
    ///
    /// Prefer passing an explicit `AssetManager` around; this exists for code
    /// that has no context to thread one through.
    pub fn global() -> &'static AssetManager {
        &GLOBAL
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pure lookup by filename or id. Never loads.
    ///
    /// With `Owner::NONE` the first entry for the key is returned whoever owns
    /// it; otherwise the owner must match.
    pub fn find(&self, key: impl Into<AssetKey>, owner: Owner) -> Option<AnyAsset> {
        let key = key.into();
        let registry = self.registry.lock();
        registry.find(&key, owner).map(|e| e.asset.clone())
    }

    /// Typed lookup. Never loads.
    pub fn find_as<T: Asset>(
        &self,
        key: impl Into<AssetKey>,
        owner: Owner,
    ) -> Result<AssetHandle<T>, AssetError> {
        let key = key.into();
        let found = self
            .find(key.clone(), owner)
            .ok_or_else(|| AssetError::NotFound {
                key: key.to_string(),
            })?;

        T::from_any(&found).ok_or_else(|| AssetError::TypeMismatch {
            key: key.to_string(),
            expected: T::KIND,
            found: found.kind(),
        })
    }

    /// Return the asset registered for `(filename, owner)`, loading and
    /// registering it first if needed.
    ///
    /// A failed load registers nothing and is retried in full on the next call.
    pub fn create<T: Asset>(
        &self,
        filename: impl AsRef<Path>,
        owner: Owner,
    ) -> Result<AssetHandle<T>, AssetError> {
        let filename = normalize_filename(&filename.as_ref().to_string_lossy());
        if filename.is_empty() {
            return Err(AssetError::EmptyFilename);
        }

        let kind = T::KIND;
        let mut registry = self.registry.lock();

        let existing = registry
            .find_exact(&filename, owner)
            .map(|e| (T::from_any(&e.asset), e.asset.kind()));
        if let Some((typed, found)) = existing {
            return match typed {
                Some(handle) => {
                    registry.stats.hits += 1;
                    Ok(handle)
                }
                None => {
                    tracing::error!(
                        filename = %filename,
                        expected = %kind,
                        %found,
                        "asset requested with the wrong type"
                    );
                    Err(AssetError::TypeMismatch {
                        key: filename,
                        expected: kind,
                        found,
                    })
                }
            };
        }

        registry.stats.misses += 1;
        match T::load(&self.resolve(&filename)) {
            Ok(asset) => Ok(registry.register(filename, owner, asset)),
            Err(err) => {
                registry.stats.load_failures += 1;
                tracing::error!(filename = %filename, %kind, error = %err, "failed to load asset");
                Err(err)
            }
        }
    }

    /// Register a fresh default-constructed asset with no filename.
    /// Every call creates a new entry.
    pub fn create_default<T: Asset + Default>(&self, owner: Owner) -> AssetHandle<T> {
        self.insert(T::default(), owner)
    }

    /// Register an asset built in memory (sprite cut from a sheet, generated
    /// mesh, ...). It can be found by id but not by filename.
    pub fn insert<T: Asset>(&self, asset: T, owner: Owner) -> AssetHandle<T> {
        self.registry.lock().register(String::new(), owner, asset)
    }

    /// Remove this instance's entry and release its payload.
    ///
    /// Returns `false`, changing nothing, when the handle is not registered.
    /// Other copies of the same file under other owners are untouched.
    pub fn destroy<T: Asset>(&self, handle: &AssetHandle<T>) -> bool {
        self.destroy_any(&T::into_any(handle.clone()))
    }

    pub fn destroy_any(&self, asset: &AnyAsset) -> bool {
        let removed = self.registry.lock().remove(asset.instance_ptr());
        match removed {
            Some(entry) => {
                // Released outside the registry lock.
                entry.asset.release();
                tracing::debug!(id = %entry.id, filename = %entry.filename, owner = %entry.owner, "destroyed asset");
                true
            }
            None => {
                tracing::warn!(id = %asset.id(), kind = %asset.kind(), "destroy requested for unregistered asset");
                false
            }
        }
    }

    /// Release and remove every asset. Meant for engine shutdown; safe to
    /// call on an empty registry.
    pub fn destroy_all(&self) {
        let drained: Vec<Entry> = {
            let mut registry = self.registry.lock();
            registry.stats.destroyed += registry.entries.len() as u64;
            registry.entries.drain(..).collect()
        };

        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "destroying all assets");
        }
        for entry in drained {
            entry.asset.release();
        }
    }

    pub fn asset_count(&self) -> usize {
        self.registry.lock().entries.len()
    }

    /// Everything registered under `owner`, for subsystems tearing down their
    /// own copies. Owners are not cleaned up automatically.
    pub fn owned_by(&self, owner: Owner) -> Vec<AnyAsset> {
        self.registry
            .lock()
            .entries
            .iter()
            .filter(|e| e.owner == owner)
            .map(|e| e.asset.clone())
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        self.registry.lock().stats
    }

    fn resolve(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new(AssetSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mesh, Texture};

    fn manager() -> AssetManager {
        AssetManager::new(AssetSettings {
            root: PathBuf::from("/nonexistent/anvil-test-root"),
        })
    }

    #[test]
    fn test_find_never_creates() {
        let assets = manager();

        assert!(assets.find("missing.png", Owner::NONE).is_none());
        assert_eq!(assets.asset_count(), 0);
        assert_eq!(assets.stats(), CacheStats::default());
    }

    #[test]
    fn test_failed_load_registers_nothing_and_retries() {
        let assets = manager();

        let first = assets.create::<Texture>("missing.png", Owner::NONE);
        let second = assets.create::<Texture>("missing.png", Owner::NONE);

        assert!(first.unwrap_err().is_load_failure());
        assert!(second.is_err());
        assert_eq!(assets.asset_count(), 0);
        assert_eq!(assets.stats().load_failures, 2);
    }

    #[test]
    fn test_empty_filename() {
        let assets = manager();
        assert!(matches!(
            assets.create::<Mesh>("", Owner::NONE),
            Err(AssetError::EmptyFilename)
        ));
    }

    #[test]
    fn test_insert_is_found_by_id_only() {
        let assets = manager();
        let owner = Owner::unique();
        let quad = assets.insert(Mesh::quad(1.0, 1.0), owner);

        let by_id = assets.find(quad.id(), owner).unwrap();
        assert_eq!(by_id.id(), quad.id());
        assert!(assets.find("", Owner::NONE).is_none());
    }

    #[test]
    fn test_create_default_never_dedups() {
        let assets = manager();
        let a = assets.create_default::<Texture>(Owner::NONE);
        let b = assets.create_default::<Texture>(Owner::NONE);

        assert!(!a.ptr_eq(&b));
        assert_eq!(assets.asset_count(), 2);
        assert!(!a.read().is_loaded());
    }

    #[test]
    fn test_find_as_reports_mismatch() {
        let assets = manager();
        let quad = assets.insert(Mesh::quad(1.0, 1.0), Owner::NONE);

        let err = assets.find_as::<Texture>(quad.id(), Owner::NONE).unwrap_err();
        assert!(matches!(
            err,
            AssetError::TypeMismatch {
                expected: crate::AssetKind::Texture,
                found: crate::AssetKind::Mesh,
                ..
            }
        ));
        assert!(matches!(
            assets.find_as::<Mesh>("nope.obj", Owner::NONE),
            Err(AssetError::NotFound { .. })
        ));
    }

    #[test]
    fn test_destroy_releases_payload() {
        let assets = manager();
        let quad = assets.insert(Mesh::quad(1.0, 1.0), Owner::NONE);

        assert!(assets.destroy(&quad));
        assert!(!quad.read().is_loaded());
        assert!(!assets.destroy(&quad));
        assert_eq!(assets.stats().destroyed, 1);
    }

    #[test]
    fn test_owned_by() {
        let assets = manager();
        let scene = Owner::unique();
        assets.insert(Mesh::quad(1.0, 1.0), scene);
        assets.insert(Mesh::quad(2.0, 2.0), scene);
        assets.insert(Mesh::quad(3.0, 3.0), Owner::NONE);

        let mine = assets.owned_by(scene);
        assert_eq!(mine.len(), 2);
        for asset in &mine {
            assert!(assets.destroy_any(asset));
        }
        assert_eq!(assets.asset_count(), 1);
    }

    #[test]
    fn test_global_is_one_instance() {
        let first = AssetManager::global();
        let second = AssetManager::global();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.root(), Path::new("assets"));
    }

    #[test]
    fn test_destroy_all_is_idempotent() {
        let assets = manager();
        assets.insert(Mesh::quad(1.0, 1.0), Owner::NONE);

        assets.destroy_all();
        assets.destroy_all();
        assert_eq!(assets.asset_count(), 0);
    }
}
