//! Post-processing effects
//!
//! An effect is a shader asset plus the uniform values the renderer should
//! bind with it. Values are only accepted for uniforms the shader declares.

use anvil_asset::{AssetError, AssetHandle, AssetManager, Owner, Shader};
use glam::Mat4;
use std::collections::HashMap;

/// Effects shipped in the engine's shader bundle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EffectType {
    HorizontalGaussianBlur,
    VerticalGaussianBlur,
    Grayscale,
}

impl EffectType {
    pub const ALL: [EffectType; 3] = [
        EffectType::HorizontalGaussianBlur,
        EffectType::VerticalGaussianBlur,
        EffectType::Grayscale,
    ];

    /// Shader file loaded for this effect, relative to the asset root.
    pub fn shader_filename(&self) -> &'static str {
        match self {
            EffectType::HorizontalGaussianBlur => "shaders/gaussian_blur_h.glsl",
            EffectType::VerticalGaussianBlur => "shaders/gaussian_blur_v.glsl",
            EffectType::Grayscale => "shaders/grayscale.glsl",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Floats(Vec<f32>),
    Ints(Vec<i32>),
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<&[f32]> for UniformValue {
    fn from(value: &[f32]) -> Self {
        UniformValue::Floats(value.to_vec())
    }
}

impl From<&[i32]> for UniformValue {
    fn from(value: &[i32]) -> Self {
        UniformValue::Ints(value.to_vec())
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

#[derive(Debug, Default)]
pub struct Effect {
    kind: Option<EffectType>,
    shader: Option<AssetHandle<Shader>>,
    /// uniform name -> location, filled lazily
    locations: HashMap<String, u32>,
    values: HashMap<u32, UniformValue>,
    enabled: bool,
}

impl Effect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the effect's shader. All effects of one type share a single
    /// shader asset.
    pub fn init(&mut self, assets: &AssetManager, kind: EffectType) -> Result<(), AssetError> {
        let shader = assets.create::<Shader>(kind.shader_filename(), Owner::NONE)?;
        tracing::debug!(?kind, uniforms = shader.read().uniforms().len(), "effect initialized");
        self.kind = Some(kind);
        self.shader = Some(shader);
        self.locations.clear();
        self.values.clear();
        Ok(())
    }

    pub fn kind(&self) -> Option<EffectType> {
        self.kind
    }

    /// Store a uniform value. Returns `false` if the shader has no such uniform.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<UniformValue>) -> bool {
        let Some(location) = self.location(name) else {
            return false;
        };
        self.values.insert(location, value.into());
        true
    }

    pub fn set_matrix(&mut self, name: &str, matrix: Mat4) -> bool {
        self.set_parameter(name, matrix)
    }

    /// Column-major 4x4 matrix.
    pub fn set_matrix_cols(&mut self, name: &str, values: &[f32; 16]) -> bool {
        self.set_parameter(name, Mat4::from_cols_array(values))
    }

    pub fn parameter(&self, name: &str) -> Option<&UniformValue> {
        let location = self.locations.get(name)?;
        self.values.get(location)
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn location(&mut self, name: &str) -> Option<u32> {
        if let Some(&location) = self.locations.get(name) {
            return Some(location);
        }

        let location = self.shader.as_ref()?.read().uniform_location(name)?;
        self.locations.insert(name.to_string(), location);
        Some(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_asset::AssetSettings;

    const GRAYSCALE: &str = "\
#shader vertex
uniform mat4 mvp;
void main() {}
#shader fragment
uniform float strength;
uniform float weights[3];
void main() {}
";

    fn assets_with_grayscale() -> (tempfile::TempDir, AssetManager) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shaders")).unwrap();
        std::fs::write(dir.path().join("shaders/grayscale.glsl"), GRAYSCALE).unwrap();
        let assets = AssetManager::new(AssetSettings {
            root: dir.path().to_path_buf(),
        });
        (dir, assets)
    }

    #[test]
    fn test_parameters_require_declared_uniforms() {
        let (_dir, assets) = assets_with_grayscale();
        let mut effect = Effect::new();
        effect.init(&assets, EffectType::Grayscale).unwrap();

        assert!(effect.set_parameter("strength", 0.5f32));
        assert!(effect.set_parameter("weights", &[0.2f32, 0.6, 0.2][..]));
        assert!(effect.set_matrix("mvp", Mat4::IDENTITY));
        assert!(!effect.set_parameter("missing", 1i32));

        assert_eq!(effect.parameter("strength"), Some(&UniformValue::Float(0.5)));
        assert_eq!(effect.parameter("missing"), None);
    }

    #[test]
    fn test_effects_share_shader() {
        let (_dir, assets) = assets_with_grayscale();
        let mut a = Effect::new();
        let mut b = Effect::new();
        a.init(&assets, EffectType::Grayscale).unwrap();
        b.init(&assets, EffectType::Grayscale).unwrap();

        assert_eq!(assets.asset_count(), 1);
    }

    #[test]
    fn test_uninitialized_effect() {
        let mut effect = Effect::new();
        assert!(!effect.set_parameter("strength", 1.0f32));

        effect.enable();
        assert!(effect.is_enabled());
        effect.disable();
        assert!(!effect.is_enabled());
    }

    #[test]
    fn test_missing_shader_file() {
        let (_dir, assets) = assets_with_grayscale();
        let mut effect = Effect::new();

        assert!(effect.init(&assets, EffectType::VerticalGaussianBlur).is_err());
        assert_eq!(effect.kind(), None);
    }
}
