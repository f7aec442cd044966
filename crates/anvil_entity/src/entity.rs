use anvil_asset::{AssetError, AssetHandle, AssetManager, Mesh, Owner, Texture};
use anvil_core::math::{Rect, Vec2};
use anvil_render::{MeshInstance, VertexBuffer};
use std::path::Path;

/// Basic world object: a mesh instance placed at a position, optionally textured.
#[derive(Debug, Default)]
pub struct Entity {
    position: Vec2,
    size: Vec2,
    mesh: MeshInstance,
    texture: Option<AssetHandle<Texture>>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mesh file through the registry and offload it into `vbo`.
    pub fn load_from_file(
        &mut self,
        assets: &AssetManager,
        mesh_filename: impl AsRef<Path>,
        owner: Owner,
        vbo: &mut VertexBuffer,
    ) -> Result<(), AssetError> {
        self.mesh.load_mesh_file(assets, mesh_filename, owner)?;
        if !self.mesh.load_into_vbo(vbo) {
            return Err(AssetError::InvalidData {
                reason: "mesh has no geometry to offload".to_string(),
            });
        }
        self.size = self.mesh.dimensions();
        Ok(())
    }

    pub fn load_from_mesh(&mut self, mesh: AssetHandle<Mesh>, vbo: &mut VertexBuffer) -> bool {
        self.mesh.set_mesh(mesh);
        let offloaded = self.mesh.load_into_vbo(vbo);
        if offloaded {
            self.size = self.mesh.dimensions();
        }
        offloaded
    }

    pub fn set_texture(&mut self, texture: AssetHandle<Texture>) {
        self.texture = Some(texture);
    }

    pub fn texture(&self) -> Option<&AssetHandle<Texture>> {
        self.texture.as_ref()
    }

    pub fn mesh(&self) -> &MeshInstance {
        &self.mesh
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn adjust(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}
