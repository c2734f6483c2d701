//! Equirectangular sphere textures with wrapped bilinear sampling.

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use osd_common::{Color, OsdError, OsdResult};

/// Returned when sampling a texture with no pixel data.
pub const MISSING_TEXEL: Color = Color::BLACK;

#[derive(Debug, Clone)]
pub struct Texture {
    texels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Decode an image file (PNG for the bundled skins) into RGBA texels.
    pub fn from_file(path: impl AsRef<Path>) -> OsdResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| OsdError::TextureLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let texture = Self::from_image(&img.to_rgba8());
        info!(
            path = %path.display(),
            width = texture.width,
            height = texture.height,
            "Loaded texture"
        );
        Ok(texture)
    }

    pub fn from_image(img: &RgbaImage) -> Self {
        let texels = img
            .pixels()
            .map(|p| Color::from_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Self {
            texels,
            width: img.width(),
            height: img.height(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn texel(&self, x: usize, y: usize) -> Color {
        self.texels[y * self.width as usize + x]
    }

    /// Bilinear sample at (u, v), wrapping on both axes.
    ///
    /// Texel `i` is centered at `(i + 0.5) / width`; sampling exactly there
    /// returns the texel unchanged.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.texels.is_empty() {
            return MISSING_TEXEL;
        }
        let w = self.width as i64;
        let h = self.height as i64;

        let fx = u * self.width as f32 - 0.5;
        let fy = v * self.height as f32 - 0.5;
        let x_floor = fx.floor();
        let y_floor = fy.floor();
        let tx = fx - x_floor;
        let ty = fy - y_floor;

        let x0 = (x_floor as i64).rem_euclid(w) as usize;
        let y0 = (y_floor as i64).rem_euclid(h) as usize;
        let x1 = (x0 + 1) % w as usize;
        let y1 = (y0 + 1) % h as usize;

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x1, y0);
        let p01 = self.texel(x0, y1);
        let p11 = self.texel(x1, y1);

        let mix = |c00: u8, c10: u8, c01: u8, c11: u8| -> u8 {
            let top = c00 as f32 * (1.0 - tx) + c10 as f32 * tx;
            let bottom = c01 as f32 * (1.0 - tx) + c11 as f32 * tx;
            (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8
        };

        Color::from_rgba(
            mix(p00.r(), p10.r(), p01.r(), p11.r()),
            mix(p00.g(), p10.g(), p01.g(), p11.g()),
            mix(p00.b(), p10.b(), p01.b(), p11.b()),
            mix(p00.a(), p10.a(), p01.a(), p11.a()),
        )
    }
}

/// Sample an optional texture, treating absence as missing data.
pub fn sample_or_missing(texture: Option<&Texture>, u: f32, v: f32) -> Color {
    texture.map_or(MISSING_TEXEL, |t| t.sample(u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker() -> Texture {
        // 2×2: red, green / blue, white
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        Texture::from_image(&img)
    }

    #[test]
    fn test_texel_centers_are_exact() {
        let tex = checker();
        assert_eq!(tex.sample(0.25, 0.25), Color::from_rgba(255, 0, 0, 255));
        assert_eq!(tex.sample(0.75, 0.25), Color::from_rgba(0, 255, 0, 255));
        assert_eq!(tex.sample(0.25, 0.75), Color::from_rgba(0, 0, 255, 255));
        assert_eq!(tex.sample(0.75, 0.75), Color::WHITE);
    }

    #[test]
    fn test_midpoint_blends_neighbours() {
        let tex = checker();
        let c = tex.sample(0.5, 0.25);
        assert_eq!((c.r(), c.g(), c.b()), (128, 128, 0));
    }

    #[test]
    fn test_sampling_wraps_both_axes() {
        let tex = checker();
        assert_eq!(tex.sample(1.25, 0.25), tex.sample(0.25, 0.25));
        assert_eq!(tex.sample(-0.75, -0.25), tex.sample(0.25, 0.75));
        // The left edge blends with the rightmost column
        let edge = tex.sample(0.0, 0.25);
        assert_eq!((edge.r(), edge.g()), (128, 128));
    }

    #[test]
    fn test_missing_texture_samples_black() {
        assert_eq!(sample_or_missing(None, 0.3, 0.3), Color::from_packed(0xFF00_0000));
        let empty = Texture::from_image(&RgbaImage::new(0, 0));
        assert_eq!(empty.sample(0.5, 0.5), MISSING_TEXEL);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Texture::from_file("/nonexistent/skin.png").unwrap_err();
        assert!(matches!(err, OsdError::TextureLoad { .. }));
    }
}
