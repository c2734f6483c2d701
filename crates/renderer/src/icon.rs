//! Vector icons rasterized on demand and composited with an opacity factor.

use std::path::Path;

use tracing::{debug, info};

use osd_common::{Color, OsdError, OsdResult};

use crate::framebuffer::Framebuffer;
use crate::primitives::draw_filled_circle;

/// Rasterized sizes kept per icon.
const MAX_CACHED_SIZES: usize = 4;

/// Something that can be drawn into a `width × height` box at (x, y).
pub trait IconRenderer {
    fn draw(&mut self, fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, alpha: f32);
}

/// SVG icon parsed once with `usvg` and rendered with `resvg`.
///
/// Each requested size is rasterized once and reused; celestial
/// indicators change size slowly, so a handful of entries covers them.
pub struct SvgIcon {
    tree: usvg::Tree,
    cache: Vec<(u32, u32, tiny_skia::Pixmap)>,
}

impl std::fmt::Debug for SvgIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.tree.size();
        f.debug_struct("SvgIcon")
            .field("width", &size.width())
            .field("height", &size.height())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl SvgIcon {
    pub fn from_file(path: impl AsRef<Path>) -> OsdResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| OsdError::IconLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let icon = Self::parse(&data).map_err(|reason| OsdError::IconLoad {
            path: path.display().to_string(),
            reason,
        })?;
        info!(path = %path.display(), "Loaded SVG icon");
        Ok(icon)
    }

    pub fn from_svg_str(svg: &str) -> OsdResult<Self> {
        Self::parse(svg.as_bytes()).map_err(|reason| OsdError::IconLoad {
            path: "<memory>".to_string(),
            reason,
        })
    }

    fn parse(data: &[u8]) -> Result<Self, String> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_data(data, &opt).map_err(|e| e.to_string())?;
        Ok(Self {
            tree,
            cache: Vec::with_capacity(MAX_CACHED_SIZES),
        })
    }

    fn rasterize(&self, width: u32, height: u32) -> Option<tiny_skia::Pixmap> {
        let mut pixmap = tiny_skia::Pixmap::new(width, height)?;

        let svg_size = self.tree.size();
        let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
        let offset_x = (width as f32 - svg_size.width() * scale) / 2.0;
        let offset_y = (height as f32 - svg_size.height() * scale) / 2.0;

        let transform = tiny_skia::Transform::from_scale(scale, scale)
            .post_translate(offset_x, offset_y);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        Some(pixmap)
    }

    fn cached(&mut self, width: u32, height: u32) -> Option<usize> {
        if let Some(i) = self
            .cache
            .iter()
            .position(|(w, h, _)| *w == width && *h == height)
        {
            return Some(i);
        }

        let pixmap = self.rasterize(width, height)?;
        if self.cache.len() == MAX_CACHED_SIZES {
            self.cache.remove(0);
        }
        debug!(width, height, "Rasterized SVG icon");
        self.cache.push((width, height, pixmap));
        Some(self.cache.len() - 1)
    }

    /// Number of rasterized sizes currently held.
    pub fn cached_sizes(&self) -> usize {
        self.cache.len()
    }
}

impl IconRenderer for SvgIcon {
    fn draw(&mut self, fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, alpha: f32) {
        if width == 0 || height == 0 || alpha <= 0.0 {
            return;
        }
        let Some(index) = self.cached(width, height) else {
            return;
        };
        let pixmap = &self.cache[index].2;
        composite_pixmap(fb, pixmap, x, y, alpha);
    }
}

/// Blend a premultiplied pixmap onto the framebuffer at (x, y).
fn composite_pixmap(fb: &mut Framebuffer, pixmap: &tiny_skia::Pixmap, x: i32, y: i32, alpha: f32) {
    let width = pixmap.width() as usize;
    for (i, px) in pixmap.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let c = px.demultiply();
        let color = Color::from_rgba(c.red(), c.green(), c.blue(), c.alpha()).scale_alpha(alpha);
        fb.blend_pixel(x + (i % width) as i32, y + (i / width) as i32, color);
    }
}

/// Solid disc used when no icon asset is configured.
#[derive(Debug, Clone, Copy)]
pub struct DiscIcon {
    pub color: Color,
}

impl IconRenderer for DiscIcon {
    fn draw(&mut self, fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, alpha: f32) {
        let radius = width.min(height) as f32 / 2.0;
        let cx = x + width as i32 / 2;
        let cy = y + height as i32 / 2;
        draw_filled_circle(fb, cx, cy, radius, self.color.scale_alpha(alpha));
    }
}

/// Either a loaded SVG or its disc fallback.
#[derive(Debug)]
pub enum Icon {
    Svg(SvgIcon),
    Disc(DiscIcon),
}

impl Icon {
    /// Load `path` if given, falling back to a disc of `fallback` on any failure.
    pub fn load_or_disc(path: Option<&Path>, fallback: Color) -> Self {
        match path.map(SvgIcon::from_file) {
            Some(Ok(svg)) => Icon::Svg(svg),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Icon unavailable, using disc");
                Icon::Disc(DiscIcon { color: fallback })
            }
            None => Icon::Disc(DiscIcon { color: fallback }),
        }
    }
}

impl IconRenderer for Icon {
    fn draw(&mut self, fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, alpha: f32) {
        match self {
            Icon::Svg(svg) => svg.draw(fb, x, y, width, height, alpha),
            Icon::Disc(disc) => disc.draw(fb, x, y, width, height, alpha),
        }
    }
}
