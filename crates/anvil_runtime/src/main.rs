//! Anvil Engine Runtime
//!
//! Boots settings and logging, builds the asset context, runs a short scene
//! and tears everything down.
//!
//! Usage: `anvil [settings.json]`

use anvil_asset::{AssetManager, Mesh, Owner};
use anvil_core::math::{Rect, Vec2};
use anvil_core::time::FrameClock;
use anvil_entity::{Animation, RigidBody};
use anvil_render::{Effect, EffectType, VertexBuffer};
use anvil_services::settings::Settings;
use anyhow::{Context, Result};
use std::path::PathBuf;

const DEMO_FRAMES: u64 = 120;

fn main() -> Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("anvil.json"));
    let settings = Settings::load_or_default(&settings_path)
        .with_context(|| format!("loading {}", settings_path.display()))?;

    anvil_services::logging::init(&settings.logging)?;

    tracing::info!("Anvil Engine v{}", anvil_core::VERSION);
    let assets = AssetManager::new(settings.assets.clone());
    tracing::info!(root = %assets.root().display(), "asset registry ready");

    run_scene(&assets);

    tracing::info!(stats = ?assets.stats(), remaining = assets.asset_count(), "shutting down");
    assets.destroy_all();

    Ok(())
}

/// Small scene exercising the registry: a falling body, an optional sprite
/// animation and an optional post effect. Missing asset files are logged and
/// skipped.
fn run_scene(assets: &AssetManager) {
    let scene = Owner::unique();
    let mut vbo = VertexBuffer::new();

    let mut body = RigidBody::new();
    if let Err(err) = body.load_from_file(assets, "meshes/crate.obj", scene, &mut vbo) {
        tracing::warn!(error = %err, "falling back to a generated quad");
        body.load_from_mesh(assets.insert(Mesh::quad(32.0, 32.0), scene), &mut vbo);
    }
    body.move_to(Vec2::new(100.0, 0.0));
    body.add_vforce(9.8 * 10.0);

    let mut animation = Animation::new();
    if let Err(err) = animation.load_from_file(assets, "sprites/hero.icanim", scene) {
        tracing::warn!(error = %err, "hero animation unavailable");
    }

    let mut grayscale = Effect::new();
    match grayscale.init(assets, EffectType::Grayscale) {
        Ok(()) => {
            grayscale.set_parameter("strength", 1.0f32);
            grayscale.enable();
        }
        Err(err) => tracing::warn!(error = %err, "grayscale effect unavailable"),
    }

    let floor = Rect::new(0.0, 400.0, 640.0, 80.0);
    let mut clock = FrameClock::new();
    while clock.frame_count() < DEMO_FRAMES {
        clock.advance_frame();
        let dt = clock.delta_seconds();

        body.update(dt);
        animation.update(dt);

        if body.check_collision(&floor) {
            tracing::info!(frame = clock.frame_count(), "body reached the floor");
            body.equalize();
        }
    }

    tracing::info!(
        frames = clock.frame_count(),
        vertices = vbo.vertices().len(),
        sprites = animation.sprite_count(),
        position = ?body.entity().position(),
        "scene finished"
    );

    for asset in assets.owned_by(scene) {
        assets.destroy_any(&asset);
    }
}
