//! Anvil Asset Registry
//!
//! Loads textures, meshes, shaders and animation descriptors, deduplicates
//! them by `(filename, owner)` and tracks them until they are destroyed.
//!
//! ```ignore
//! let assets = AssetManager::new(AssetSettings::default());
//! let scene = Owner::unique();
//!
//! let hero = assets.create::<Texture>("sprites/hero.png", scene)?;
//! let same = assets.create::<Texture>("sprites/hero.png", scene)?;
//! assert!(hero.ptr_eq(&same));
//!
//! assets.destroy(&hero);
//! ```

mod config;
mod error;
mod handle;
mod key;
mod kinds;
mod manager;
mod owner;

pub use config::AssetSettings;
pub use error::AssetError;
pub use handle::AssetHandle;
pub use key::{normalize_filename, AssetId, AssetKey};
pub use kinds::{
    AnimationDescriptor, AnyAsset, Asset, AssetKind, Mesh, Shader, ShaderStage, Texture, Vertex,
};
pub use manager::{AssetManager, CacheStats};
pub use owner::Owner;
