//! Aiming crosshair with rotary speed readouts around it.

use std::fmt::Write;

use tracing::info;

use osd_common::{
    CrosshairConfig, CrosshairOrientation, ResourcePaths, RotarySpeeds, SpeedIndicatorsConfig,
    TelemetrySnapshot,
};

use crate::framebuffer::Framebuffer;
use crate::primitives::{draw_circle_outline, draw_filled_circle, draw_line};
use crate::text::{centered_x, load_font, TextOutline, TextRenderer};

/// Distance from the center to the azimuth readout.
pub const SPEED_RADIUS_HORIZONTAL: i32 = 110;
/// Distance from the center to the elevation readout.
pub const SPEED_RADIUS_VERTICAL: i32 = 90;

const DIAGONAL_FACTOR: f32 = 0.707;

pub struct Crosshair {
    config: CrosshairConfig,
    speed: SpeedIndicatorsConfig,
    speed_font: Option<Box<dyn TextRenderer>>,
    text: String,
}

impl std::fmt::Debug for Crosshair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crosshair")
            .field("enabled", &self.config.enabled)
            .field("orientation", &self.config.orientation)
            .field("speed_font", &self.speed_font.is_some())
            .finish()
    }
}

impl Crosshair {
    pub fn new(config: &CrosshairConfig, speed: &SpeedIndicatorsConfig, resources: &ResourcePaths) -> Self {
        let font = if config.enabled && speed.enabled {
            load_font(resources, speed.font, "speed_indicators")
        } else {
            None
        };
        Self::with_font(config, speed, font)
    }

    pub fn with_font(
        config: &CrosshairConfig,
        speed: &SpeedIndicatorsConfig,
        speed_font: Option<Box<dyn TextRenderer>>,
    ) -> Self {
        if config.enabled {
            info!(
                orientation = ?config.orientation,
                speed_indicators = speed.enabled && speed_font.is_some(),
                "Crosshair ready"
            );
        }
        Self {
            config: config.clone(),
            speed: speed.clone(),
            speed_font,
            text: String::with_capacity(16),
        }
    }

    /// Draw one frame. Returns `true` when the crosshair is enabled.
    pub fn render(&mut self, fb: &mut Framebuffer, snapshot: &TelemetrySnapshot) -> bool {
        if !self.config.enabled {
            return false;
        }
        let (offset_x, offset_y) = snapshot.crosshair_offset();
        let cx = fb.width() as i32 / 2 + offset_x;
        let cy = fb.height() as i32 / 2 + offset_y;

        self.draw_circle(fb, cx, cy);
        self.draw_cross(fb, cx, cy);
        self.draw_center_dot(fb, cx, cy);
        if let Some(rotary) = snapshot.rotary {
            self.draw_speed_indicators(fb, cx, cy, &rotary);
        }
        true
    }

    fn draw_circle(&self, fb: &mut Framebuffer, cx: i32, cy: i32) {
        let circle = &self.config.circle;
        if circle.enabled {
            draw_circle_outline(fb, cx, cy, circle.radius, circle.color, circle.thickness);
        }
    }

    fn draw_cross(&self, fb: &mut Framebuffer, cx: i32, cy: i32) {
        let cross = &self.config.cross;
        if !cross.enabled {
            return;
        }
        let (fx, fy) = (cx as f32, cy as f32);
        let mut arm = |x0: f32, y0: f32, x1: f32, y1: f32| {
            draw_line(fb, x0 as i32, y0 as i32, x1 as i32, y1 as i32, cross.color, cross.thickness);
        };

        match self.config.orientation {
            CrosshairOrientation::Vertical => {
                let (gap, len) = (cross.gap, cross.length);
                arm(fx, fy - gap, fx, fy - gap - len);
                arm(fx, fy + gap, fx, fy + gap + len);
                arm(fx - gap, fy, fx - gap - len, fy);
                arm(fx + gap, fy, fx + gap + len, fy);
            }
            CrosshairOrientation::Diagonal => {
                let gap = cross.gap * DIAGONAL_FACTOR;
                let len = cross.length * DIAGONAL_FACTOR;
                arm(fx + gap, fy - gap, fx + gap + len, fy - gap - len);
                arm(fx + gap, fy + gap, fx + gap + len, fy + gap + len);
                arm(fx - gap, fy + gap, fx - gap - len, fy + gap + len);
                arm(fx - gap, fy - gap, fx - gap - len, fy - gap - len);
            }
        }
    }

    fn draw_center_dot(&self, fb: &mut Framebuffer, cx: i32, cy: i32) {
        let dot = &self.config.center_dot;
        if dot.enabled {
            draw_filled_circle(fb, cx, cy, dot.radius, dot.color);
        }
    }

    fn draw_speed_indicators(&mut self, fb: &mut Framebuffer, cx: i32, cy: i32, rotary: &RotarySpeeds) {
        if !self.speed.enabled || !rotary.is_moving {
            return;
        }
        let Some(font) = self.speed_font.as_deref() else {
            return;
        };
        let speed = &self.speed;
        let threshold = speed.threshold as f64;

        if rotary.azimuth_speed.abs() > threshold {
            let degrees = rotary.azimuth_speed * speed.max_speed_azimuth as f64;
            let center_x = if degrees < 0.0 {
                cx - SPEED_RADIUS_HORIZONTAL
            } else {
                cx + SPEED_RADIUS_HORIZONTAL
            };
            draw_speed(fb, font, &mut self.text, speed, degrees, center_x, cy);
        }

        if rotary.elevation_speed.abs() > threshold {
            let degrees = rotary.elevation_speed * speed.max_speed_elevation as f64;
            let center_y = if degrees < 0.0 {
                cy + SPEED_RADIUS_VERTICAL
            } else {
                cy - SPEED_RADIUS_VERTICAL
            };
            draw_speed(fb, font, &mut self.text, speed, degrees, cx, center_y);
        }
    }
}

/// Write a speed readout, always unsigned with three decimals.
pub fn format_speed(out: &mut String, degrees_per_second: f64) {
    out.clear();
    let _ = write!(out, "{:.3}", degrees_per_second.abs());
}

fn draw_speed(
    fb: &mut Framebuffer,
    font: &dyn TextRenderer,
    text: &mut String,
    config: &SpeedIndicatorsConfig,
    degrees: f64,
    center_x: i32,
    center_y: i32,
) {
    format_speed(text, degrees);
    let text = text.as_str();
    let font_size = config.font_size as f32;
    font.draw_text(
        fb,
        text,
        centered_x(font, text, font_size, center_x),
        center_y - config.font_size as i32 / 2,
        font_size,
        config.color,
        Some(TextOutline::BLACK_1PX),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use osd_common::{Color, CrosshairOffsets};

    fn crosshair(config: CrosshairConfig) -> Crosshair {
        Crosshair::with_font(&config, &SpeedIndicatorsConfig::default(), None)
    }

    #[test]
    fn test_format_speed() {
        let mut s = String::new();
        format_speed(&mut s, -8.75);
        assert_eq!(s, "8.750");
        format_speed(&mut s, 35.0);
        assert_eq!(s, "35.000");
    }

    #[test]
    fn test_default_crosshair_at_screen_center() {
        let mut fb = Framebuffer::new(200, 100).unwrap();
        let mut ch = crosshair(CrosshairConfig::default());
        assert!(ch.render(&mut fb, &TelemetrySnapshot::default()));

        // Dot, circle and the gap between them
        assert_eq!(fb.pixel(100, 50), Some(Color::RED));
        assert_eq!(fb.pixel(115, 50), Some(Color::RED));
        assert_eq!(fb.pixel(100, 44), Some(Color::TRANSPARENT));
        // Arm tip: gap 10 + length 35
        assert_eq!(fb.pixel(145, 50), Some(Color::RED));
        assert_eq!(fb.pixel(148, 50), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_offsets_follow_active_camera() {
        let config = CrosshairConfig {
            circle: osd_common::config::CircleConfig {
                enabled: false,
                ..Default::default()
            },
            cross: osd_common::config::CrossConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut ch = crosshair(config);
        let snapshot = TelemetrySnapshot {
            crosshair_offsets: Some(CrosshairOffsets {
                day_horizontal: 10,
                day_vertical: 5,
                heat_horizontal: -20,
                heat_vertical: -10,
                heat_osd_enabled: true,
            }),
            ..Default::default()
        };
        let mut fb = Framebuffer::new(200, 100).unwrap();
        ch.render(&mut fb, &snapshot);
        assert_eq!(fb.pixel(80, 40), Some(Color::RED));
        assert_eq!(fb.pixel(110, 55), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_diagonal_leaves_axes_clear() {
        let config = CrosshairConfig {
            orientation: CrosshairOrientation::Diagonal,
            ..Default::default()
        };
        let mut ch = crosshair(config);
        let mut fb = Framebuffer::new(200, 200).unwrap();
        ch.render(&mut fb, &TelemetrySnapshot::default());
        // Beyond the circle, nothing on the horizontal axis
        for x in 120..200 {
            assert_eq!(fb.pixel(x, 100), Some(Color::TRANSPARENT));
        }
        assert_eq!(fb.pixel(120, 80), Some(Color::RED));
    }

    #[test]
    fn test_disabled_draws_nothing() {
        let mut ch = crosshair(CrosshairConfig {
            enabled: false,
            ..Default::default()
        });
        let mut fb = Framebuffer::new(50, 50).unwrap();
        assert!(!ch.render(&mut fb, &TelemetrySnapshot::default()));
        assert_eq!(fb.count_drawn(), 0);
    }
}
