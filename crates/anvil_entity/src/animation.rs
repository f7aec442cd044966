//! Sprite-sheet animation
//!
//! All sprites are cut from textures up front; switching frames just moves an
//! index. Call `update` once per frame with the frame delta.

use crate::Entity;
use anvil_asset::{
    AnimationDescriptor, AnyAsset, AssetError, AssetHandle, AssetId, AssetManager, Owner, Texture,
};
use anvil_core::math::Rect;
use std::path::Path;

#[derive(Debug)]
pub struct Animation {
    entity: Entity,
    sprites: Vec<AssetHandle<Texture>>,
    active: usize,
    /// Seconds per sprite.
    rate: f32,
    elapsed: f32,
    enabled: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            entity: Entity::new(),
            sprites: Vec::new(),
            active: 0,
            rate: 0.1,
            elapsed: 0.0,
            enabled: true,
        }
    }
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an `.icanim` descriptor and cut every frame out of its sheet.
    ///
    /// Returns the number of sprites added. Slow: call at load time.
    ///
    /// On error, entries this call registered under `owner` are destroyed
    /// again; entries that already existed are left alone.
    pub fn load_from_file(
        &mut self,
        assets: &AssetManager,
        filename: impl AsRef<Path>,
        owner: Owner,
    ) -> Result<usize, AssetError> {
        let existing: Vec<AssetId> = assets.owned_by(owner).iter().map(AnyAsset::id).collect();
        let cut = Self::cut_frames(assets, filename.as_ref(), owner);
        if cut.is_err() {
            for asset in assets.owned_by(owner) {
                if !existing.contains(&asset.id()) {
                    assets.destroy_any(&asset);
                }
            }
        }
        let (sprites, rate) = cut?;

        let count = sprites.len();
        for sprite in sprites {
            self.push_sprite(assets.insert(sprite, owner));
        }
        self.rate = rate;
        tracing::debug!(frames = count, rate, "animation loaded");
        Ok(count)
    }

    fn cut_frames(
        assets: &AssetManager,
        filename: &Path,
        owner: Owner,
    ) -> Result<(Vec<Texture>, f32), AssetError> {
        let descriptor = assets.create::<AnimationDescriptor>(filename, owner)?;
        let (sheet, rate, frames) = {
            let d = descriptor.read();
            (d.sheet.clone(), d.rate, d.frames.clone())
        };

        let sheet = assets.create::<Texture>(&sheet, owner)?;
        let sprites = frames
            .iter()
            .map(|frame| sheet.read().sub_texture(*frame))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((sprites, rate))
    }

    /// Add one sprite cut from `sheet_filename` at `region`.
    pub fn add_sprite(
        &mut self,
        assets: &AssetManager,
        sheet_filename: impl AsRef<Path>,
        region: Rect,
        owner: Owner,
    ) -> Result<(), AssetError> {
        let sheet = assets.create::<Texture>(sheet_filename, owner)?;
        let sprite = sheet.read().sub_texture(region)?;
        self.push_sprite(assets.insert(sprite, owner));
        Ok(())
    }

    /// Add a sprite from raw RGBA8 pixels.
    pub fn add_sprite_raw(
        &mut self,
        assets: &AssetManager,
        pixels: &[u8],
        width: u32,
        height: u32,
        owner: Owner,
    ) -> Result<(), AssetError> {
        let sprite = Texture::from_rgba(width, height, pixels.to_vec())?;
        self.push_sprite(assets.insert(sprite, owner));
        Ok(())
    }

    fn push_sprite(&mut self, sprite: AssetHandle<Texture>) {
        if self.sprites.is_empty() {
            self.entity.set_texture(sprite.clone());
        }
        self.sprites.push(sprite);
    }

    /// A disabled animation keeps showing its current sprite.
    pub fn enable(&mut self, flag: bool) {
        self.enabled = flag;
    }

    pub fn set_rate(&mut self, seconds_per_sprite: f32) {
        self.rate = seconds_per_sprite;
    }

    /// Advance to the next sprite. `false` when wrapping back to the first.
    pub fn next_sprite(&mut self) -> bool {
        if self.sprites.is_empty() {
            return false;
        }
        let advanced = self.active + 1 < self.sprites.len();
        self.active = if advanced { self.active + 1 } else { 0 };
        self.sync_texture();
        advanced
    }

    /// Step back one sprite. `false` when wrapping to the last.
    pub fn prev_sprite(&mut self) -> bool {
        if self.sprites.is_empty() {
            return false;
        }
        let stepped = self.active > 0;
        self.active = if stepped {
            self.active - 1
        } else {
            self.sprites.len() - 1
        };
        self.sync_texture();
        stepped
    }

    pub fn update(&mut self, delta_seconds: f32) {
        if !self.enabled || self.sprites.len() < 2 || self.rate <= 0.0 {
            return;
        }

        self.elapsed += delta_seconds;
        if self.elapsed < self.rate {
            return;
        }

        let steps = (self.elapsed / self.rate).floor();
        self.elapsed = (self.elapsed - steps * self.rate).max(0.0);
        if self.elapsed >= self.rate {
            // rate below the precision of elapsed
            self.elapsed = 0.0;
        }

        let len = self.sprites.len();
        let advance = (steps as u64 % len as u64) as usize;
        self.active = (self.active + advance) % len;
        self.sync_texture();
    }

    fn sync_texture(&mut self) {
        self.entity.set_texture(self.sprites[self.active].clone());
    }

    pub fn texture(&self) -> Option<&AssetHandle<Texture>> {
        self.sprites.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_asset::{Asset, AssetSettings};

    fn three_sprites(assets: &AssetManager) -> Animation {
        let mut anim = Animation::new();
        for shade in [0u8, 100, 200] {
            anim.add_sprite_raw(assets, &[shade; 4], 1, 1, Owner::NONE)
                .unwrap();
        }
        anim
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let assets = AssetManager::new(AssetSettings::default());
        let mut anim = three_sprites(&assets);

        assert!(anim.next_sprite());
        assert!(anim.next_sprite());
        assert!(!anim.next_sprite()); // wrapped
        assert_eq!(anim.active_index(), 0);

        assert!(!anim.prev_sprite()); // wrapped to end
        assert_eq!(anim.active_index(), 2);
        assert!(anim
            .entity()
            .texture()
            .unwrap()
            .ptr_eq(anim.texture().unwrap()));
    }

    #[test]
    fn test_update_follows_rate() {
        let assets = AssetManager::new(AssetSettings::default());
        let mut anim = three_sprites(&assets);
        anim.set_rate(0.5);

        anim.update(0.25);
        assert_eq!(anim.active_index(), 0);
        anim.update(0.3);
        assert_eq!(anim.active_index(), 1);
        anim.update(1.0);
        assert_eq!(anim.active_index(), 0);

        anim.enable(false);
        anim.update(10.0);
        assert_eq!(anim.active_index(), 0);
    }

    #[test]
    fn test_update_with_tiny_rate_returns() {
        let assets = AssetManager::new(AssetSettings::default());
        let mut anim = three_sprites(&assets);
        anim.set_rate(1e-9);

        anim.update(1.0);
        anim.update(1.0);
        assert!(anim.active_index() < 3);
        assert!(anim
            .entity()
            .texture()
            .unwrap()
            .ptr_eq(anim.texture().unwrap()));
    }

    #[test]
    fn test_update_skips_several_sprites_at_once() {
        let assets = AssetManager::new(AssetSettings::default());
        let mut anim = three_sprites(&assets);
        anim.set_rate(0.25);

        // four steps over three sprites
        anim.update(1.1);
        assert_eq!(anim.active_index(), 1);
    }

    #[test]
    fn test_failed_load_destroys_what_it_created() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]))
            .save(dir.path().join("sheet.png"))
            .unwrap();
        std::fs::write(
            dir.path().join("broken.icanim"),
            r#"{ "sheet": "sheet.png", "frames": [ { "x": 2, "y": 0, "w": 4, "h": 4 } ] }"#,
        )
        .unwrap();
        let assets = AssetManager::new(AssetSettings {
            root: dir.path().to_path_buf(),
        });
        let owner = Owner::unique();
        let sheet = assets.create::<Texture>("sheet.png", owner).unwrap();

        let mut anim = Animation::new();
        assert!(anim.load_from_file(&assets, "broken.icanim", owner).is_err());
        assert_eq!(anim.sprite_count(), 0);

        // the sheet was registered before the call and survives
        let left = assets.owned_by(owner);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id(), sheet.id());
        assert!(sheet.read().is_loaded());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        })
        .save(dir.path().join("sheet.png"))
        .unwrap();
        std::fs::write(
            dir.path().join("walk.icanim"),
            r#"{ "sheet": "sheet.png", "rate": 0.2,
                 "frames": [ { "x": 0, "y": 0, "w": 4, "h": 4 },
                             { "x": 4, "y": 0, "w": 4, "h": 4 } ] }"#,
        )
        .unwrap();
        let assets = AssetManager::new(AssetSettings {
            root: dir.path().to_path_buf(),
        });
        let owner = Owner::unique();

        let mut anim = Animation::new();
        assert_eq!(anim.load_from_file(&assets, "walk.icanim", owner).unwrap(), 2);
        assert_eq!(anim.texture().unwrap().read().pixel(0, 0), Some([255, 0, 0, 255]));
        anim.next_sprite();
        assert_eq!(anim.texture().unwrap().read().pixel(0, 0), Some([0, 0, 255, 255]));

        // descriptor + sheet + two sprites
        assert_eq!(assets.owned_by(owner).len(), 4);
    }

    #[test]
    fn test_load_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetManager::new(AssetSettings {
            root: dir.path().to_path_buf(),
        });

        let mut anim = Animation::new();
        assert!(anim.load_from_file(&assets, "nope.icanim", Owner::NONE).is_err());
        assert_eq!(anim.sprite_count(), 0);
        assert_eq!(assets.asset_count(), 0);
    }
}
