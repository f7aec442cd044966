//! Force-driven entity with box collision.
//!
//! Placeholder physics: forces are integrated straight into position, there is
//! no collision response.

use crate::Entity;
use anvil_asset::{AssetError, AssetHandle, AssetManager, Mesh, Owner};
use anvil_core::math::{Rect, Vec2};
use anvil_render::VertexBuffer;
use std::path::Path;

#[derive(Debug, Default)]
pub struct RigidBody {
    entity: Entity,
    collision_box: Rect,
    vertical: f32,
    horizontal: f32,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file(
        &mut self,
        assets: &AssetManager,
        mesh_filename: impl AsRef<Path>,
        owner: Owner,
        vbo: &mut VertexBuffer,
    ) -> Result<(), AssetError> {
        self.entity
            .load_from_file(assets, mesh_filename, owner, vbo)?;
        self.collision_box = self.entity.bounds();
        Ok(())
    }

    pub fn load_from_mesh(&mut self, mesh: AssetHandle<Mesh>, vbo: &mut VertexBuffer) -> bool {
        let loaded = self.entity.load_from_mesh(mesh, vbo);
        self.collision_box = self.entity.bounds();
        loaded
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.entity.move_to(position);
        self.collision_box = self.entity.bounds();
    }

    pub fn adjust(&mut self, delta: Vec2) {
        self.entity.adjust(delta);
        self.collision_box = self.entity.bounds();
    }

    pub fn add_vforce(&mut self, dy: f32) {
        self.vertical += dy;
    }

    pub fn add_hforce(&mut self, dx: f32) {
        self.horizontal += dx;
    }

    /// Cancel all accumulated forces.
    pub fn equalize(&mut self) {
        self.vertical = 0.0;
        self.horizontal = 0.0;
    }

    pub fn forces(&self) -> Vec2 {
        Vec2::new(self.horizontal, self.vertical)
    }

    pub fn check_collision(&self, other: &Rect) -> bool {
        self.collision_box.intersects(other)
    }

    pub fn check_collision_with(&self, other: &Entity) -> bool {
        self.check_collision(&other.bounds())
    }

    /// Move by the accumulated forces (units per second).
    pub fn update(&mut self, delta_seconds: f32) {
        let force = self.forces();
        if force != Vec2::ZERO {
            self.adjust(force * delta_seconds);
        }
    }

    pub fn collision_box(&self) -> Rect {
        self.collision_box
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }
}
