//! Anvil Engine Core
//!
//! Contains the fundamental building blocks shared by every engine crate:
//! - 2D math (rectangles on top of glam)
//! - Frame timing

pub mod math;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
