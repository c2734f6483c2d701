//! Fixed-capacity RGBA framebuffer with clipped source-over writes.
//!
//! ## Design
//!
//! - **Allocated once**: the backing store is sized at construction and
//!   never grows. Changing dimensions within that capacity reuses the same
//!   memory; asking for more is an error rather than a reallocation.
//! - **Silent clipping**: every write takes signed coordinates and drops
//!   anything outside the visible area, so widgets can draw partly
//!   off-screen without their own bounds checks.
//! - **Packed pixels**: one `u32` per pixel in `0xAABBGGRR` order, which
//!   reads as R, G, B, A bytes on little-endian hosts.

use osd_common::config::{MAX_FRAMEBUFFER_HEIGHT, MAX_FRAMEBUFFER_WIDTH};
use osd_common::{Color, OsdError, OsdResult};

#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Framebuffer whose capacity matches its initial size exactly.
    pub fn new(width: u32, height: u32) -> OsdResult<Self> {
        Self::with_capacity(width, height, width as usize * height as usize)
    }

    /// Framebuffer with room for the largest supported display.
    pub fn with_max_capacity(width: u32, height: u32) -> OsdResult<Self> {
        Self::with_capacity(
            width,
            height,
            MAX_FRAMEBUFFER_WIDTH as usize * MAX_FRAMEBUFFER_HEIGHT as usize,
        )
    }

    fn with_capacity(width: u32, height: u32, capacity: usize) -> OsdResult<Self> {
        let mut fb = Self {
            pixels: vec![0; capacity],
            width: 0,
            height: 0,
        };
        fb.set_dimensions(width, height)?;
        Ok(fb)
    }

    /// Change the visible size without touching the allocation.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> OsdResult<()> {
        let needed = width as usize * height as usize;
        if width == 0 || height == 0 || needed > self.pixels.len() {
            return Err(OsdError::FramebufferCapacity {
                width,
                height,
                capacity: self.pixels.len(),
            });
        }
        self.width = width;
        self.height = height;
        self.clear();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels the backing store can hold.
    pub fn capacity(&self) -> usize {
        self.pixels.len()
    }

    /// Reset the visible area to fully transparent.
    pub fn clear(&mut self) {
        let len = self.visible_len();
        self.pixels[..len].fill(0);
    }

    #[inline]
    fn visible_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Read a pixel; `None` outside the visible area.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| Color::from_packed(self.pixels[i]))
    }

    /// Overwrite a pixel without blending. Out-of-bounds is a no-op.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.packed();
        }
    }

    /// Source-over composite `color` onto a pixel. Out-of-bounds is a no-op.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.a() == 0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = Color::from_packed(self.pixels[i]);
            self.pixels[i] = color.blend_over(dst).packed();
        }
    }

    /// Visible pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels[..self.visible_len()]
    }

    /// Copy visible pixels out as RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.visible_len() * 4);
        for px in self.pixels() {
            out.extend_from_slice(&px.to_le_bytes());
        }
        out
    }

    /// Count visible pixels with non-zero alpha.
    pub fn count_drawn(&self) -> usize {
        self.pixels().iter().filter(|px| (*px >> 24) != 0).count()
    }
}
