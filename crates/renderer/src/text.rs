//! Text rendering through TrueType fonts.
//!
//! Widgets only need two things from a font: how wide a string will be and
//! a way to stamp it with an optional outline. [`TextRenderer`] captures
//! that, and [`FontResource`] implements it with `rusttype`.

use std::cell::RefCell;
use std::path::Path;

use rusttype::{point, Font, PositionedGlyph, Scale};
use tracing::{info, warn};

use osd_common::{Color, FontName, OsdError, OsdResult, ResourcePaths};

use crate::framebuffer::Framebuffer;

/// Outline drawn behind text to keep it legible over the video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOutline {
    pub color: Color,
    pub width: i32,
}

impl TextOutline {
    /// The 1px black outline every OSD label uses.
    pub const BLACK_1PX: TextOutline = TextOutline {
        color: Color::BLACK,
        width: 1,
    };
}

pub trait TextRenderer {
    /// Advance width of `text` in pixels at `font_size`.
    fn measure_width(&self, text: &str, font_size: f32) -> i32;

    /// Draw `text` with its top-left corner at (x, y).
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        fb: &mut Framebuffer,
        text: &str,
        x: i32,
        y: i32,
        font_size: f32,
        color: Color,
        outline: Option<TextOutline>,
    );
}

/// A TrueType font loaded once at widget init.
///
/// Glyph layouts are written into a buffer owned by the font, so drawing
/// reuses its capacity instead of allocating per call.
pub struct FontResource {
    font: Font<'static>,
    glyphs: RefCell<Vec<PositionedGlyph<'static>>>,
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl FontResource {
    pub fn from_file(path: impl AsRef<Path>) -> OsdResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| OsdError::FontLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let font = Self::from_bytes(data).map_err(|_| OsdError::FontLoad {
            path: path.display().to_string(),
            reason: "not a valid TrueType font".to_string(),
        })?;
        info!(path = %path.display(), glyphs = font.font.glyph_count(), "Loaded font");
        Ok(font)
    }

    pub fn from_bytes(data: Vec<u8>) -> OsdResult<Self> {
        Font::try_from_vec(data)
            .map(|font| Self {
                font,
                glyphs: RefCell::new(Vec::with_capacity(32)),
            })
            .ok_or_else(|| OsdError::FontLoad {
                path: "<memory>".to_string(),
                reason: "not a valid TrueType font".to_string(),
            })
    }

    fn layout<'a>(
        &'a self,
        text: &'a str,
        font_size: f32,
        x: f32,
        y: f32,
    ) -> impl Iterator<Item = PositionedGlyph<'static>> + 'a {
        let scale = Scale::uniform(font_size);
        let ascent = self.font.v_metrics(scale).ascent;
        self.font.layout(text, scale, point(x, y + ascent))
    }

    fn stamp(&self, fb: &mut Framebuffer, glyphs: &[PositionedGlyph<'static>], dx: i32, dy: i32, color: Color) {
        for glyph in glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                if coverage <= 0.0 {
                    return;
                }
                fb.blend_pixel(
                    bb.min.x + gx as i32 + dx,
                    bb.min.y + gy as i32 + dy,
                    color.scale_alpha(coverage.min(1.0)),
                );
            });
        }
    }
}

impl TextRenderer for FontResource {
    fn measure_width(&self, text: &str, font_size: f32) -> i32 {
        self.layout(text, font_size, 0.0, 0.0)
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
            .ceil() as i32
    }

    fn draw_text(
        &self,
        fb: &mut Framebuffer,
        text: &str,
        x: i32,
        y: i32,
        font_size: f32,
        color: Color,
        outline: Option<TextOutline>,
    ) {
        if text.is_empty() {
            return;
        }
        let mut glyphs = self.glyphs.borrow_mut();
        glyphs.clear();
        glyphs.extend(self.layout(text, font_size, x as f32, y as f32));

        if let Some(outline) = outline {
            let w = outline.width.max(1);
            for oy in -w..=w {
                for ox in -w..=w {
                    if ox != 0 || oy != 0 {
                        self.stamp(fb, &glyphs, ox, oy, outline.color);
                    }
                }
            }
        }
        self.stamp(fb, &glyphs, 0, 0, color);
    }
}

/// Load a registered font for `widget`, logging and returning `None` on failure.
pub fn load_font(resources: &ResourcePaths, font: FontName, widget: &str) -> Option<Box<dyn TextRenderer>> {
    match FontResource::from_file(resources.font(font)) {
        Ok(f) => Some(Box::new(f)),
        Err(e) => {
            warn!(widget, font = font.config_name(), error = %e, "Font unavailable, text disabled");
            None
        }
    }
}

/// Horizontal start that centers `text` on `center_x`.
pub fn centered_x(renderer: &dyn TextRenderer, text: &str, font_size: f32, center_x: i32) -> i32 {
    center_x - renderer.measure_width(text, font_size) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_is_load_error() {
        let err = FontResource::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, OsdError::FontLoad { .. }));
        assert!(err.is_init_failure());
    }

    #[test]
    fn test_glyph_buffer_reused_between_draws() {
        let Some(path) = test_utils::find_test_file(FontName::LiberationSansBold.relative_path()) else {
            eprintln!("SKIPPED: Liberation Sans not installed");
            return;
        };
        let font = FontResource::from_file(&path).unwrap();
        let fresh = FontResource::from_file(&path).unwrap();

        let mut fb = Framebuffer::new(200, 40).unwrap();
        font.draw_text(&mut fb, "2024-06-21 12:00:00", 0, 0, 14.0, Color::WHITE, None);
        let capacity = font.glyphs.borrow().capacity();

        fb.clear();
        font.draw_text(&mut fb, "12.500", 5, 5, 14.0, Color::WHITE, Some(TextOutline::BLACK_1PX));
        assert_eq!(font.glyphs.borrow().capacity(), capacity);
        assert_eq!(font.glyphs.borrow().len(), 6);

        let mut expected = Framebuffer::new(200, 40).unwrap();
        fresh.draw_text(&mut expected, "12.500", 5, 5, 14.0, Color::WHITE, Some(TextOutline::BLACK_1PX));
        assert_eq!(fb.pixels(), expected.pixels());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = FontResource::from_bytes(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, OsdError::FontLoad { .. }));
    }
}
