//! Synthetic equirectangular textures with known layouts.
//!
//! Column `x` of a `w`-wide texture maps to longitude `u = (x + 0.5) / w`,
//! row `y` to `v = (y + 0.5) / h`. The navball's forward direction samples
//! `u = v = 0.5`, the texture center.

use image::{Rgba, RgbaImage};

/// Four flat quadrants: red top-left, green top-right, blue bottom-left,
/// white bottom-right.
pub fn create_quadrant_texture(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let right = x >= width / 2;
        let bottom = y >= height / 2;
        match (right, bottom) {
            (false, false) => Rgba([255, 0, 0, 255]),
            (true, false) => Rgba([0, 255, 0, 255]),
            (false, true) => Rgba([0, 0, 255, 255]),
            (true, true) => Rgba([255, 255, 255, 255]),
        }
    })
}

/// Black texture with a `block`-sized colored square at the center.
///
/// Used to check that the forward direction lands on the texture center.
pub fn create_center_block_texture(width: u32, height: u32, block: u32, rgba: [u8; 4]) -> RgbaImage {
    let (x0, y0) = ((width - block) / 2, (height - block) / 2);
    RgbaImage::from_fn(width, height, |x, y| {
        if (x0..x0 + block).contains(&x) && (y0..y0 + block).contains(&y) {
            Rgba(rgba)
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Red channel encodes longitude (0 at the left edge, 255 at the right),
/// green encodes latitude (0 at the top, 255 at the bottom).
pub fn create_longitude_gradient_texture(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.saturating_sub(1).max(1)) as u8;
        let g = (y * 255 / height.saturating_sub(1).max(1)) as u8;
        Rgba([r, g, 0, 255])
    })
}
