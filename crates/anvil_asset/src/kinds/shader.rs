use super::{impl_any_conversions, Asset, AssetKind};
use crate::AssetError;
use std::path::Path;

/// Stages a shader source file can contain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Vertex/fragment source pair read from a single `.glsl` file.
///
/// Stages are introduced by `#shader vertex` and `#shader fragment` lines.
/// Sources are kept as text; nothing is compiled here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shader {
    vertex: String,
    fragment: String,
    uniforms: Vec<String>,
    loaded: bool,
}

impl Shader {
    pub fn from_source(source: &str) -> Result<Self, String> {
        let mut vertex = String::new();
        let mut fragment = String::new();
        let mut stage: Option<ShaderStage> = None;

        for (lineno, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("#shader") {
                stage = Some(match rest.trim() {
                    "vertex" => ShaderStage::Vertex,
                    "fragment" => ShaderStage::Fragment,
                    other => return Err(format!("line {}: unknown stage `{other}`", lineno + 1)),
                });
                continue;
            }

            let target = match stage {
                Some(ShaderStage::Vertex) => &mut vertex,
                Some(ShaderStage::Fragment) => &mut fragment,
                None if trimmed.is_empty() || trimmed.starts_with("//") => continue,
                None => {
                    return Err(format!(
                        "line {}: source outside of a #shader section",
                        lineno + 1
                    ))
                }
            };
            target.push_str(line);
            target.push('\n');
        }

        if vertex.trim().is_empty() {
            return Err("missing vertex stage".to_string());
        }
        if fragment.trim().is_empty() {
            return Err("missing fragment stage".to_string());
        }

        let mut uniforms = Vec::new();
        for name in collect_uniforms(&vertex).chain(collect_uniforms(&fragment)) {
            if !uniforms.contains(&name) {
                uniforms.push(name);
            }
        }

        Ok(Self {
            vertex,
            fragment,
            uniforms,
            loaded: true,
        })
    }

    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// Uniform names in declaration order (vertex stage first).
    pub fn uniforms(&self) -> &[String] {
        &self.uniforms
    }

    pub fn uniform_location(&self, name: &str) -> Option<u32> {
        self.uniforms
            .iter()
            .position(|u| u == name)
            .map(|idx| idx as u32)
    }
}

/// `uniform vec2 u_offset;` -> `u_offset`, `uniform float weights[5];` -> `weights`
fn collect_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let mut tokens = line.trim().strip_prefix("uniform ")?.split_whitespace();
        let _ty = tokens.next()?;
        let name = tokens
            .next()?
            .split(|c: char| c == '[' || c == ';')
            .next()?
            .trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

impl Asset for Shader {
    const KIND: AssetKind = AssetKind::Shader;

    fn load(path: &Path) -> Result<Self, AssetError> {
        let source = std::fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
        Shader::from_source(&source).map_err(|reason| AssetError::decode(path, reason))
    }

    fn release(&mut self) {
        self.vertex.clear();
        self.fragment.clear();
        self.uniforms.clear();
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    impl_any_conversions!(Shader);
}
