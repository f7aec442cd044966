use super::{impl_any_conversions, Asset, AssetKind};
use crate::AssetError;
use bytemuck::{Pod, Zeroable};
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Interleaved vertex layout shared by meshes and the CPU vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            tex_coord,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    loaded: bool,
}

impl Mesh {
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, AssetError> {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(AssetError::InvalidData {
                reason: format!("index {bad} out of range for {} vertices", vertices.len()),
            });
        }

        Ok(Self {
            vertices,
            indices,
            loaded: true,
        })
    }

    /// Unit-textured quad with its top-left corner at the origin.
    pub fn quad(width: f32, height: f32) -> Self {
        let vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([width, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([width, height, 0.0], [1.0, 1.0]),
            Vertex::new([0.0, height, 0.0], [0.0, 1.0]),
        ];
        Self {
            vertices,
            indices: vec![0, 1, 2, 2, 3, 0],
            loaded: true,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Tint every vertex.
    pub fn set_color(&mut self, color: [f32; 4]) {
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.extent(0)
    }

    /// Extent along Y.
    pub fn height(&self) -> f32 {
        self.extent(1)
    }

    fn extent(&self, axis: usize) -> f32 {
        let mut iter = self.vertices.iter().map(|v| v.position[axis]);
        let Some(first) = iter.next() else {
            return 0.0;
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        max - min
    }

    /// Append this mesh to caller-owned buffers, rebasing indices onto the
    /// vertices already present. Returns `false` for an unloaded mesh.
    pub fn offload(&self, vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>) -> bool {
        if !self.loaded || self.vertices.is_empty() {
            return false;
        }

        let base = vertices.len() as u32;
        vertices.extend_from_slice(&self.vertices);
        indices.extend(self.indices.iter().map(|i| i + base));
        true
    }

    fn from_obj(bytes: &[u8]) -> Result<Self, String> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let mut reader = BufReader::new(Cursor::new(bytes));
        // Materials are not part of the mesh asset.
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &options, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|err| err.to_string())?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;
            let count = mesh.positions.len() / 3;

            for i in 0..count {
                let position = [
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ];
                let tex_coord = if mesh.texcoords.len() >= (i + 1) * 2 {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                };
                let color = if mesh.vertex_color.len() >= (i + 1) * 3 {
                    [
                        mesh.vertex_color[i * 3],
                        mesh.vertex_color[i * 3 + 1],
                        mesh.vertex_color[i * 3 + 2],
                        1.0,
                    ]
                } else {
                    [1.0, 1.0, 1.0, 1.0]
                };
                vertices.push(Vertex {
                    position,
                    tex_coord,
                    color,
                });
            }
            indices.extend(mesh.indices.iter().map(|i| i + base));
        }

        if vertices.is_empty() {
            return Err("no geometry".to_string());
        }
        Mesh::from_parts(vertices, indices).map_err(|err| err.to_string())
    }
}

impl Asset for Mesh {
    const KIND: AssetKind = AssetKind::Mesh;

    fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|err| AssetError::io(path, err))?;
        Mesh::from_obj(&bytes).map_err(|reason| AssetError::decode(path, reason))
    }

    fn release(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    impl_any_conversions!(Mesh);
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &str = "\
o tri
v 0.0 0.0 0.0
v 4.0 0.0 0.0
v 0.0 2.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
";

    #[test]
    fn test_parse_obj() {
        let mesh = Mesh::from_obj(TRIANGLE_OBJ.as_bytes()).unwrap();

        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.indices().len(), 3);
        assert_eq!(mesh.width(), 4.0);
        assert_eq!(mesh.height(), 2.0);
    }

    #[test]
    fn test_parse_empty_obj_fails() {
        assert!(Mesh::from_obj(b"# nothing here\n").is_err());
    }

    #[test]
    fn test_offload_rebases_indices() {
        let quad = Mesh::quad(2.0, 2.0);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        assert!(quad.offload(&mut vertices, &mut indices));
        assert!(quad.offload(&mut vertices, &mut indices));
        assert_eq!(vertices.len(), 8);
        assert_eq!(&indices[6..], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn test_released_mesh_does_not_offload() {
        let mut quad = Mesh::quad(1.0, 1.0);
        quad.release();

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        assert!(!quad.offload(&mut vertices, &mut indices));
        assert!(vertices.is_empty());
    }

    #[test]
    fn test_from_parts_rejects_bad_index() {
        let verts = vec![Vertex::default(); 2];
        assert!(Mesh::from_parts(verts, vec![0, 1, 2]).is_err());
    }
}
