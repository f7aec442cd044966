use super::{impl_any_conversions, Asset, AssetKind};
use crate::AssetError;
use anvil_core::math::Rect;
use image::{imageops, ImageError, RgbaImage};
use std::path::Path;

/// RGBA8 texture decoded from PNG, JPEG or BMP.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    loaded: bool,
}

impl Texture {
    /// Build a texture from raw RGBA8 pixels (row-major, 4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(AssetError::InvalidData {
                reason: format!(
                    "{width}x{height} texture needs {expected} bytes, got {}",
                    pixels.len()
                ),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            loaded: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(px)
    }

    /// Copy a rectangular region out of this texture (sprite sheets, glyph atlases).
    pub fn sub_texture(&self, region: Rect) -> Result<Texture, AssetError> {
        if region.x < 0.0 || region.y < 0.0 || region.w <= 0.0 || region.h <= 0.0 {
            return Err(AssetError::InvalidData {
                reason: format!("region {region:?} is empty or negative"),
            });
        }

        let (x, y) = (region.x as u32, region.y as u32);
        let (w, h) = (region.w as u32, region.h as u32);
        let fits = |start: u32, len: u32, max: u32| start.checked_add(len).is_some_and(|end| end <= max);
        if !fits(x, w, self.width) || !fits(y, h, self.height) {
            return Err(AssetError::InvalidData {
                reason: format!(
                    "region {region:?} exceeds {}x{} texture",
                    self.width, self.height
                ),
            });
        }

        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(
            || AssetError::InvalidData {
                reason: "texture has been released".to_string(),
            },
        )?;
        let cropped = imageops::crop_imm(&image, x, y, w, h).to_image();

        Texture::from_rgba(w, h, cropped.into_raw())
    }
}

impl Asset for Texture {
    const KIND: AssetKind = AssetKind::Texture;

    fn load(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path).map_err(|err| match err {
            ImageError::IoError(source) => AssetError::io(path, source),
            other => AssetError::decode(path, other),
        })?;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Texture::from_rgba(width, height, rgba.into_raw())
    }

    fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    impl_any_conversions!(Texture);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> Texture {
        // 2x2: red, green / blue, white
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        Texture::from_rgba(2, 2, pixels).unwrap()
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Texture::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(checkerboard().is_loaded());
    }

    #[test]
    fn test_sub_texture() {
        let tex = checkerboard();
        let blue = tex.sub_texture(Rect::new(0.0, 1.0, 1.0, 1.0)).unwrap();

        assert_eq!((blue.width(), blue.height()), (1, 1));
        assert_eq!(blue.pixel(0, 0), Some([0, 0, 255, 255]));
        assert!(tex.sub_texture(Rect::new(1.0, 1.0, 2.0, 1.0)).is_err());
    }

    #[test]
    fn test_release() {
        let mut tex = checkerboard();
        tex.release();

        assert!(!tex.is_loaded());
        assert!(tex.pixels().is_empty());
        assert_eq!(tex.pixel(0, 0), None);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Texture::load(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }
}
