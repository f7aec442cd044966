//! The closed set of asset kinds the registry can hold.

mod animation;
mod mesh;
mod shader;
mod texture;

pub use animation::AnimationDescriptor;
pub use mesh::{Mesh, Vertex};
pub use shader::{Shader, ShaderStage};
pub use texture::Texture;

use crate::{AssetError, AssetHandle, AssetId};
use std::fmt;
use std::path::Path;

/// Type discriminant stored alongside every registry entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Mesh,
    Shader,
    Animation,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Texture => "texture",
            AssetKind::Mesh => "mesh",
            AssetKind::Shader => "shader",
            AssetKind::Animation => "animation",
        };
        f.write_str(name)
    }
}

/// A type the registry knows how to load, store and release.
pub trait Asset: Send + Sync + Sized + 'static {
    const KIND: AssetKind;

    /// Type-specific loader.
    fn load(path: &Path) -> Result<Self, AssetError>;

    /// Drop the loaded payload. The value stays valid but reports unloaded.
    fn release(&mut self);

    fn is_loaded(&self) -> bool;

    fn into_any(handle: AssetHandle<Self>) -> AnyAsset;

    /// Typed view of a type-erased handle, `None` when the kind differs.
    fn from_any(any: &AnyAsset) -> Option<AssetHandle<Self>>;
}

/// Type-erased handle as returned by untyped lookups.
#[derive(Debug, Clone)]
pub enum AnyAsset {
    Texture(AssetHandle<Texture>),
    Mesh(AssetHandle<Mesh>),
    Shader(AssetHandle<Shader>),
    Animation(AssetHandle<AnimationDescriptor>),
}

impl AnyAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            AnyAsset::Texture(_) => AssetKind::Texture,
            AnyAsset::Mesh(_) => AssetKind::Mesh,
            AnyAsset::Shader(_) => AssetKind::Shader,
            AnyAsset::Animation(_) => AssetKind::Animation,
        }
    }

    pub fn id(&self) -> AssetId {
        match self {
            AnyAsset::Texture(h) => h.id(),
            AnyAsset::Mesh(h) => h.id(),
            AnyAsset::Shader(h) => h.id(),
            AnyAsset::Animation(h) => h.id(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        match self {
            AnyAsset::Texture(h) => h.read().is_loaded(),
            AnyAsset::Mesh(h) => h.read().is_loaded(),
            AnyAsset::Shader(h) => h.read().is_loaded(),
            AnyAsset::Animation(h) => h.read().is_loaded(),
        }
    }

    /// Checked downcast.
    pub fn downcast<T: Asset>(&self) -> Option<AssetHandle<T>> {
        T::from_any(self)
    }

    pub fn ptr_eq(&self, other: &AnyAsset) -> bool {
        self.instance_ptr() == other.instance_ptr()
    }

    pub(crate) fn instance_ptr(&self) -> *const () {
        match self {
            AnyAsset::Texture(h) => h.instance_ptr(),
            AnyAsset::Mesh(h) => h.instance_ptr(),
            AnyAsset::Shader(h) => h.instance_ptr(),
            AnyAsset::Animation(h) => h.instance_ptr(),
        }
    }

    pub(crate) fn release(&self) {
        match self {
            AnyAsset::Texture(h) => h.write().release(),
            AnyAsset::Mesh(h) => h.write().release(),
            AnyAsset::Shader(h) => h.write().release(),
            AnyAsset::Animation(h) => h.write().release(),
        }
    }
}

/// Wires a kind into `AnyAsset` conversions.
macro_rules! impl_any_conversions {
    ($variant:ident) => {
        fn into_any(handle: $crate::AssetHandle<Self>) -> $crate::AnyAsset {
            $crate::AnyAsset::$variant(handle)
        }

        fn from_any(any: &$crate::AnyAsset) -> Option<$crate::AssetHandle<Self>> {
            match any {
                $crate::AnyAsset::$variant(handle) => Some(handle.clone()),
                _ => None,
            }
        }
    };
}

pub(crate) use impl_any_conversions;
