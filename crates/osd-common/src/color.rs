//! Packed 32-bit colors and source-over compositing.
//!
//! Pixels are stored as `0xAABBGGRR`, which places the bytes in R, G, B, A
//! order in memory on little-endian targets. Configuration files write
//! colors the other way around (`#RRGGBB` / `#AARRGGBB`), so parsing goes
//! through [`Color::parse`] rather than raw integers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OsdError, OsdResult};

/// A packed RGBA color in `0xAABBGGRR` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFF00_00FF);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFFFF_0000);
    pub const CYAN: Color = Color(0xFFFF_FF00);
    pub const YELLOW: Color = Color(0xFF00_FFFF);

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    /// Wrap a value already in framebuffer byte order.
    pub const fn from_packed(packed: u32) -> Self {
        Color(packed)
    }

    /// Convert from the `0xAARRGGBB` integer layout used by config files.
    pub const fn from_argb(argb: u32) -> Self {
        let a = (argb >> 24) as u8;
        let r = (argb >> 16) as u8;
        let g = (argb >> 8) as u8;
        let b = argb as u8;
        Color::from_rgba(r, g, b, a)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Color((self.0 & 0x00FF_FFFF) | ((a as u32) << 24))
    }

    /// Multiply the alpha channel by `factor` (clamped to 0..=1).
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        self.with_alpha((self.a() as f32 * factor) as u8)
    }

    /// Multiply the color channels by `factor`, leaving alpha untouched.
    pub fn scale_rgb(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Color::from_rgba(scale(self.r()), scale(self.g()), scale(self.b()), self.a())
    }

    /// Source-over composite `self` onto `dst`.
    pub fn blend_over(self, dst: Color) -> Color {
        let src_a = self.a();
        if src_a == 0 {
            return dst;
        }
        if src_a == 255 {
            return self;
        }

        let src_a_f = src_a as f32 / 255.0;
        let dst_a_f = dst.a() as f32 / 255.0;
        let out_a = src_a_f + dst_a_f * (1.0 - src_a_f);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            ((s as f32 * src_a_f + d as f32 * dst_a_f * (1.0 - src_a_f)) / out_a)
                .round()
                .clamp(0.0, 255.0) as u8
        };

        Color::from_rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            (out_a * 255.0).round() as u8,
        )
    }

    /// Parse `#RRGGBB`, `#AARRGGBB`, or a small set of color names.
    pub fn parse(s: &str) -> OsdResult<Color> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            let value = u32::from_str_radix(hex, 16)
                .map_err(|_| OsdError::InvalidColor(s.to_string()))?;
            return match hex.len() {
                6 => Ok(Color::from_argb(0xFF00_0000 | value)),
                8 => Ok(Color::from_argb(value)),
                _ => Err(OsdError::InvalidColor(s.to_string())),
            };
        }
        named_color(trimmed).ok_or_else(|| OsdError::InvalidColor(s.to_string()))
    }

    /// Format as `#AARRGGBB`.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            self.a(),
            self.r(),
            self.g(),
            self.b()
        )
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "cyan" => Color::CYAN,
        "yellow" => Color::YELLOW,
        _ => return None,
    };
    Some(color)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = OsdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
