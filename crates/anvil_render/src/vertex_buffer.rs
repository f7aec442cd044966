//! CPU vertex/index staging

use anvil_asset::Vertex;

/// Vertex and index arrays that meshes offload into before upload.
#[derive(Debug, Default)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Both arrays at once, the shape `Mesh::offload` wants.
    pub fn buffers_mut(&mut self) -> (&mut Vec<Vertex>, &mut Vec<u32>) {
        (&mut self.vertices, &mut self.indices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_asset::Mesh;

    #[test]
    fn test_byte_views() {
        let mut vbo = VertexBuffer::new();
        let (vertices, indices) = vbo.buffers_mut();
        assert!(Mesh::quad(1.0, 1.0).offload(vertices, indices));

        assert_eq!(vbo.vertex_bytes().len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(vbo.index_bytes().len(), 6 * 4);

        vbo.clear();
        assert!(vbo.is_empty());
    }
}
