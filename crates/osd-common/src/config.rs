//! Widget configuration loaded from JSON.
//!
//! Every section and field is optional in the file; missing values take
//! the defaults below, so `{}` is a complete configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Color;
use crate::error::{OsdError, OsdResult};
use crate::resources::{FontName, NavballSkin};

/// Largest supported framebuffer.
pub const MAX_FRAMEBUFFER_WIDTH: u32 = 1920;
pub const MAX_FRAMEBUFFER_HEIGHT: u32 = 1080;

/// Radar compass supports at most this many distance rings.
pub const MAX_RADAR_RINGS: usize = 5;

/// Root OSD configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsdConfig {
    /// Directory that fonts, skins, and icons are resolved against
    pub resource_root: String,

    /// Which camera stream this overlay is composited onto
    pub stream: StreamVariant,

    pub width: u32,
    pub height: u32,

    pub crosshair: CrosshairConfig,
    pub timestamp: TimestampConfig,
    pub speed_indicators: SpeedIndicatorsConfig,
    pub navball: NavballConfig,
    pub radar_compass: RadarCompassConfig,
    pub celestial_indicators: CelestialIndicatorsConfig,
}

impl Default for OsdConfig {
    fn default() -> Self {
        Self {
            resource_root: "resources".to_string(),
            stream: StreamVariant::Day,
            width: MAX_FRAMEBUFFER_WIDTH,
            height: MAX_FRAMEBUFFER_HEIGHT,
            crosshair: CrosshairConfig::default(),
            timestamp: TimestampConfig::default(),
            speed_indicators: SpeedIndicatorsConfig::default(),
            navball: NavballConfig::default(),
            radar_compass: RadarCompassConfig::default(),
            celestial_indicators: CelestialIndicatorsConfig::default(),
        }
    }
}

impl OsdConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> OsdResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| OsdError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> OsdResult<Self> {
        serde_json::from_str(json).map_err(|e| OsdError::ConfigParse(e.to_string()))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> OsdResult<()> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_FRAMEBUFFER_WIDTH
            || self.height > MAX_FRAMEBUFFER_HEIGHT
        {
            return Err(invalid(
                "width/height",
                format!(
                    "{}x{} outside 1x1..{}x{}",
                    self.width, self.height, MAX_FRAMEBUFFER_WIDTH, MAX_FRAMEBUFFER_HEIGHT
                ),
            ));
        }
        if self.navball.enabled && self.navball.size == 0 {
            return Err(invalid("navball.size", "must be positive"));
        }
        if self.navball.enabled && self.navball.size > MAX_FRAMEBUFFER_HEIGHT {
            return Err(invalid("navball.size", "larger than the framebuffer"));
        }
        if self.radar_compass.enabled && self.radar_compass.size <= 0 {
            return Err(invalid("radar_compass.size", "must be positive"));
        }

        // Extra distances are dropped by the widget and an empty list means no rings.
        let rings = &self.radar_compass.rings.distances;
        if self.radar_compass.enabled && rings.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(invalid(
                "radar_compass.rings.distances",
                "distances must be positive",
            ));
        }

        if !self.celestial_indicators.visibility_threshold.is_finite() {
            return Err(invalid(
                "celestial_indicators.visibility_threshold",
                "must be finite",
            ));
        }
        if self.celestial_indicators.scale <= 0.0 {
            return Err(invalid("celestial_indicators.scale", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> OsdError {
    OsdError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Camera stream the overlay belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamVariant {
    #[default]
    Day,
    Thermal,
}

// === Crosshair ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrosshairOrientation {
    /// `+` shape
    #[default]
    Vertical,
    /// `×` shape
    Diagonal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    pub enabled: bool,
    pub orientation: CrosshairOrientation,
    pub center_dot: CenterDotConfig,
    pub cross: CrossConfig,
    pub circle: CircleConfig,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            orientation: CrosshairOrientation::Vertical,
            center_dot: CenterDotConfig::default(),
            cross: CrossConfig::default(),
            circle: CircleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterDotConfig {
    pub enabled: bool,
    pub radius: f32,
    pub color: Color,
}

impl Default for CenterDotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 3.0,
            color: Color::RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossConfig {
    pub enabled: bool,
    /// Length of each arm
    pub length: f32,
    /// Gap between the center and the start of each arm
    pub gap: f32,
    pub thickness: f32,
    pub color: Color,
}

impl Default for CrossConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            length: 35.0,
            gap: 10.0,
            thickness: 4.0,
            color: Color::RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    pub enabled: bool,
    pub radius: f32,
    pub thickness: f32,
    pub color: Color,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 15.0,
            thickness: 2.0,
            color: Color::RED,
        }
    }
}

// === Text widgets ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampConfig {
    pub enabled: bool,
    pub position_x: i32,
    pub position_y: i32,
    pub color: Color,
    pub font_size: u32,
    pub font: FontName,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position_x: 10,
            position_y: 10,
            color: Color::CYAN,
            font_size: 14,
            font: FontName::LiberationSansBold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedIndicatorsConfig {
    pub enabled: bool,
    pub color: Color,
    pub font_size: u32,
    /// Minimum normalized speed (0..1) before an indicator is shown
    pub threshold: f32,
    /// Degrees per second at normalized speed 1.0
    pub max_speed_azimuth: f32,
    pub max_speed_elevation: f32,
    pub font: FontName,
}

impl Default for SpeedIndicatorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::GREEN,
            font_size: 14,
            threshold: 0.05,
            max_speed_azimuth: 35.0,
            max_speed_elevation: 35.0,
            font: FontName::LiberationSansBold,
        }
    }
}

// === Navball ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavballConfig {
    pub enabled: bool,
    pub position_x: i32,
    pub position_y: i32,
    /// Sphere diameter in pixels
    pub size: u32,
    pub skin: NavballSkin,
    pub show_level_marker: bool,
    pub show_center_indicator: bool,
    /// Reticle size as a fraction of the diameter
    pub center_indicator_scale: f32,
    /// Optional SVG reticle; a primitive reticle is drawn without one
    pub center_indicator_svg: Option<String>,
}

impl Default for NavballConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position_x: 1600,
            position_y: 760,
            size: 280,
            skin: NavballSkin::Stock,
            show_level_marker: true,
            show_center_indicator: true,
            center_indicator_scale: 0.25,
            center_indicator_svg: None,
        }
    }
}

// === Radar compass ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarCompassConfig {
    pub enabled: bool,
    pub position_x: i32,
    pub position_y: i32,
    /// Outer diameter in pixels
    pub size: i32,
    pub rings: RingsConfig,
    pub cardinals: CardinalsConfig,
    pub fov_wedge: FovWedgeConfig,
}

impl Default for RadarCompassConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position_x: 810,
            position_y: 730,
            size: 300,
            rings: RingsConfig::default(),
            cardinals: CardinalsConfig::default(),
            fov_wedge: FovWedgeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingsConfig {
    /// Ring distances in kilometres
    pub distances: Vec<f32>,
    pub color: Color,
    pub thickness: f32,
    pub show_labels: bool,
    pub label_font_size: u32,
    pub label_font: FontName,
}

impl Default for RingsConfig {
    fn default() -> Self {
        Self {
            distances: vec![1.0, 5.0, 20.0],
            color: Color::WHITE.with_alpha(0x80),
            thickness: 1.5,
            show_labels: true,
            label_font_size: 12,
            label_font: FontName::LiberationSansBold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardinalsConfig {
    pub color: Color,
    pub font_size: u32,
    pub font: FontName,
}

impl Default for CardinalsConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_size: 18,
            font: FontName::LiberationSansBold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovWedgeConfig {
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_thickness: f32,
}

impl Default for FovWedgeConfig {
    fn default() -> Self {
        Self {
            fill_color: Color::GREEN.with_alpha(0x30),
            outline_color: Color::GREEN,
            outline_thickness: 2.0,
        }
    }
}

// === Celestial indicators ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelestialIndicatorsConfig {
    pub enabled: bool,
    pub show_sun: bool,
    pub show_moon: bool,
    /// Multiplier on the default indicator size
    pub scale: f32,
    /// Bodies below this altitude (degrees) are not drawn
    pub visibility_threshold: f32,

    /// Radar compass icons
    pub sun_svg: Option<String>,
    pub moon_svg: Option<String>,

    /// Navball icons for the near and far hemisphere
    pub sun_front_svg: Option<String>,
    pub sun_back_svg: Option<String>,
    pub moon_front_svg: Option<String>,
    pub moon_back_svg: Option<String>,

    /// Disc colors used when no icon is configured
    pub sun_color: Color,
    pub moon_color: Color,
}

impl Default for CelestialIndicatorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_sun: true,
            show_moon: true,
            scale: 1.0,
            visibility_threshold: -5.0,
            sun_svg: Some("radar_indicators/sun.svg".to_string()),
            moon_svg: Some("radar_indicators/moon.svg".to_string()),
            sun_front_svg: None,
            sun_back_svg: None,
            moon_front_svg: None,
            moon_back_svg: None,
            sun_color: Color::from_rgba(255, 200, 0, 255),
            moon_color: Color::from_rgba(220, 220, 230, 255),
        }
    }
}
