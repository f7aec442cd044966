use super::{impl_any_conversions, Asset, AssetKind};
use crate::AssetError;
use anvil_core::math::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_rate() -> f32 {
    0.1
}

/// Sprite animation descriptor (`.icanim`, JSON).
///
/// ```json
/// { "sheet": "sprites/hero.png", "rate": 0.08,
///   "frames": [ { "x": 0, "y": 0, "w": 32, "h": 32 } ] }
/// ```
///
/// `sheet` is an asset filename like any other, resolved against the asset root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub sheet: String,
    /// Seconds each frame stays on screen.
    #[serde(default = "default_rate")]
    pub rate: f32,
    pub frames: Vec<Rect>,
    #[serde(skip)]
    loaded: bool,
}

impl AnimationDescriptor {
    pub fn from_json(text: &str) -> Result<Self, String> {
        let mut descriptor: AnimationDescriptor =
            serde_json::from_str(text).map_err(|err| err.to_string())?;
        descriptor.validate()?;
        descriptor.loaded = true;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), String> {
        if self.sheet.trim().is_empty() {
            return Err("`sheet` is empty".to_string());
        }
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(format!("invalid rate {}", self.rate));
        }
        if self.frames.is_empty() {
            return Err("at least one frame is required".to_string());
        }
        if let Some((idx, frame)) = self
            .frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.w <= 0.0 || f.h <= 0.0)
        {
            return Err(format!("frame {idx} has empty size {frame:?}"));
        }
        Ok(())
    }
}

impl Asset for AnimationDescriptor {
    const KIND: AssetKind = AssetKind::Animation;

    fn load(path: &Path) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
        AnimationDescriptor::from_json(&text).map_err(|reason| AssetError::decode(path, reason))
    }

    fn release(&mut self) {
        self.frames.clear();
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    impl_any_conversions!(Animation);
}
