//! Shared asset handles

use crate::AssetId;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Handle to a registered asset.
///
/// Cloning a handle is cheap and refers to the same instance; two handles are
/// the same asset iff [`AssetHandle::ptr_eq`] holds. The asset stays readable
/// through outstanding handles after it is destroyed, but its payload has been
/// released.
pub struct AssetHandle<T> {
    id: AssetId,
    inner: Arc<RwLock<T>>,
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId, asset: T) -> Self {
        Self {
            id,
            inner: Arc::new(RwLock::new(asset)),
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Shared access. Do not hold the guard across registry calls that
    /// destroy this asset: releasing the payload takes the write lock.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    /// Mutable access. Do not hold the guard across registry calls that
    /// destroy this asset.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write()
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn instance_ptr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
