//! Anvil Render Layer
//!
//! CPU-side rendering state that sits on top of the asset registry: vertex
//! staging, mesh instances, post-processing effect parameters and GUI glyphs.
//! Nothing here talks to a GPU.

pub mod effect;
pub mod glyph;
pub mod mesh_instance;
pub mod vertex_buffer;

pub use effect::{Effect, EffectType, UniformValue};
pub use glyph::Glyph;
pub use mesh_instance::MeshInstance;
pub use vertex_buffer::VertexBuffer;
