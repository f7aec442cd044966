//! A placed use of a mesh asset

use crate::VertexBuffer;
use anvil_asset::{AssetError, AssetHandle, AssetManager, Mesh, Owner};
use glam::Vec2;
use std::path::Path;

/// Mesh handle plus the dimensions captured when it was offloaded.
#[derive(Debug, Default)]
pub struct MeshInstance {
    mesh: Option<AssetHandle<Mesh>>,
    dimensions: Vec2,
}

impl MeshInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mesh(&mut self, mesh: AssetHandle<Mesh>) {
        self.mesh = Some(mesh);
    }

    /// Resolve `filename` through the registry under `owner`.
    ///
    /// On failure the previous mesh is dropped.
    pub fn load_mesh_file(
        &mut self,
        assets: &AssetManager,
        filename: impl AsRef<Path>,
        owner: Owner,
    ) -> Result<(), AssetError> {
        match assets.create::<Mesh>(filename, owner) {
            Ok(mesh) => {
                self.mesh = Some(mesh);
                Ok(())
            }
            Err(err) => {
                self.mesh = None;
                Err(err)
            }
        }
    }

    /// Append the mesh to `vbo` and record its size. `false` with no mesh or
    /// when the mesh has been released.
    pub fn load_into_vbo(&mut self, vbo: &mut VertexBuffer) -> bool {
        let Some(handle) = &self.mesh else {
            return false;
        };

        let mesh = handle.read();
        self.dimensions = Vec2::new(mesh.width(), mesh.height());
        let (vertices, indices) = vbo.buffers_mut();
        mesh.offload(vertices, indices)
    }

    pub fn mesh(&self) -> Option<&AssetHandle<Mesh>> {
        self.mesh.as_ref()
    }

    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }
}
