//! Anvil Entities
//!
//! Game-world objects built on the asset registry:
//! - `Entity`: positioned mesh + texture
//! - `Animation`: sprite-sheet animation
//! - `RigidBody`: force-driven movement with box collision

pub mod animation;
pub mod entity;
pub mod rigid_body;

pub use animation::Animation;
pub use entity::Entity;
pub use rigid_body::RigidBody;
