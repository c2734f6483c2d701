//! UTC clock readout in the corner of the overlay.

use tracing::info;

use osd_common::time::write_display_time;
use osd_common::{ResourcePaths, TelemetrySnapshot, TimestampConfig};

use crate::framebuffer::Framebuffer;
use crate::text::{load_font, TextOutline, TextRenderer};

pub struct Timestamp {
    config: TimestampConfig,
    font: Option<Box<dyn TextRenderer>>,
    text: String,
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timestamp")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Timestamp {
    pub fn new(config: &TimestampConfig, resources: &ResourcePaths) -> Self {
        let font = if config.enabled {
            load_font(resources, config.font, "timestamp")
        } else {
            None
        };
        Self::with_font(config, font)
    }

    pub fn with_font(config: &TimestampConfig, font: Option<Box<dyn TextRenderer>>) -> Self {
        if config.enabled && font.is_some() {
            info!(x = config.position_x, y = config.position_y, "Timestamp ready");
        }
        Self {
            config: config.clone(),
            font,
            text: String::with_capacity(20),
        }
    }

    /// Enabled in config with a usable font.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.font.is_some()
    }

    /// Draw the snapshot's time. Returns `true` when text was drawn.
    pub fn render(&mut self, fb: &mut Framebuffer, snapshot: &TelemetrySnapshot) -> bool {
        if !self.config.enabled {
            return false;
        }
        let Some(font) = self.font.as_deref() else {
            return false;
        };
        let Some(time) = snapshot.time else {
            return false;
        };
        if !write_display_time(&mut self.text, time.timestamp) {
            return false;
        }
        font.draw_text(
            fb,
            &self.text,
            self.config.position_x,
            self.config.position_y,
            self.config.font_size as f32,
            self.config.color,
            Some(TextOutline::BLACK_1PX),
        );
        true
    }

    /// Text drawn on the last successful render.
    pub fn text(&self) -> &str {
        &self.text
    }
}
