//! GUI glyphs

use anvil_asset::{AssetError, AssetHandle, AssetManager, Owner, Texture};
use anvil_core::math::Rect;

/// A single character of a font: its own texture and its placement box.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub texture: AssetHandle<Texture>,
    pub dim: Rect,
}

impl Glyph {
    /// Cut `region` out of a font atlas and register it as a raw texture
    /// owned by `owner`.
    pub fn from_atlas(
        assets: &AssetManager,
        atlas: &AssetHandle<Texture>,
        region: Rect,
        owner: Owner,
    ) -> Result<Self, AssetError> {
        let texture = atlas.read().sub_texture(region)?;
        Ok(Self {
            texture: assets.insert(texture, owner),
            dim: Rect::new(0.0, 0.0, region.w, region.h),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_asset::AssetSettings;

    #[test]
    fn test_from_atlas() {
        let assets = AssetManager::new(AssetSettings::default());
        let atlas = assets.insert(Texture::from_rgba(4, 2, vec![255; 32]).unwrap(), Owner::NONE);
        let font = Owner::unique();

        let glyph = Glyph::from_atlas(&assets, &atlas, Rect::new(2.0, 0.0, 2.0, 2.0), font).unwrap();

        assert_eq!(glyph.texture.read().width(), 2);
        assert_eq!(glyph.dim, Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(assets.owned_by(font).len(), 1);
    }
}
