//! Radar compass: a heading-up compass rose drawn as a flattened ellipse.
//!
//! The rose rotates opposite the platform heading so that the camera
//! always points to the top of the widget. Layers are drawn back to
//! front: distance rings, ring labels, FOV wedge, cardinal letters, then
//! Sun and Moon markers on the rim.

use std::fmt::Write;

use tracing::info;

use celestial::{is_visible, Body, CelestialPositions, HorizontalPosition};
use osd_common::{
    CelestialIndicatorsConfig, CompassAngle, RadarCompassConfig, ResourcePaths,
    StreamVariant, TelemetrySnapshot,
};

use crate::framebuffer::Framebuffer;
use crate::icon::{Icon, IconRenderer};
use crate::primitives::{
    compass_point, draw_ellipse_outline, draw_ellipse_wedge_filled, draw_ellipse_wedge_outline,
};
use crate::text::{centered_x, load_font, TextOutline, TextRenderer};

/// Vertical squash of the rose, as if viewed from above at an angle.
pub const PERSPECTIVE_SCALE: f32 = 0.5;

/// FOV drawn when telemetry carries no camera section.
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;

const CARDINALS: [(&str, f32); 4] = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)];
const CARDINAL_RADIUS_FACTOR: f32 = 0.85;
const CELESTIAL_RADIUS_FACTOR: f32 = 0.9;
const LABEL_BEARING: f32 = 90.0;
const LABEL_NUDGE_X: i32 = 5;
const MIN_INDICATOR_SIZE: i32 = 8;

/// Ellipse layout for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub cx: i32,
    pub cy: i32,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Degrees added to every world bearing
    pub rotation: f32,
}

impl RadarGeometry {
    pub fn new(config: &RadarCompassConfig, platform_azimuth: f32) -> Self {
        let radius_x = config.size as f32 / 2.0;
        Self {
            cx: config.position_x + config.size / 2,
            cy: config.position_y + (config.size as f32 * PERSPECTIVE_SCALE / 2.0) as i32,
            radius_x,
            radius_y: radius_x * PERSPECTIVE_SCALE,
            rotation: -platform_azimuth,
        }
    }

    /// Screen point at `fraction` of the radii along a world bearing.
    pub fn point(&self, bearing: f32, fraction: f32) -> (i32, i32) {
        compass_point(
            self.cx,
            self.cy,
            self.radius_x * fraction,
            self.radius_y * fraction,
            CompassAngle(bearing + self.rotation),
        )
    }
}

/// FOV to draw: absent telemetry uses the default, a non-positive value hides the wedge.
pub fn resolve_fov(fov: Option<f64>) -> Option<f32> {
    match fov {
        None => Some(DEFAULT_FOV_DEGREES),
        Some(v) if v.is_finite() && v > 0.0 => Some(v as f32),
        Some(_) => None,
    }
}

/// Write a ring distance label into `out`.
pub fn format_distance(out: &mut String, distance_km: f32) {
    out.clear();
    if distance_km >= 1.0 {
        let _ = write!(out, "{:.0}km", distance_km);
    } else {
        let _ = write!(out, "{:.0}m", distance_km * 1000.0);
    }
}

/// Size multiplier and opacity of a rim marker at `altitude` degrees.
pub fn altitude_style(altitude: f64) -> (f32, f32) {
    let fraction = (altitude / 90.0) as f32;
    if altitude > 0.0 {
        (1.0 + fraction * 0.5, 1.0)
    } else {
        (0.7 + fraction * 0.3, (0.5 + fraction * 0.3).max(0.2))
    }
}

pub struct RadarCompass {
    config: RadarCompassConfig,
    celestial: CelestialIndicatorsConfig,
    stream: StreamVariant,
    enabled: bool,
    label_font: Option<Box<dyn TextRenderer>>,
    cardinal_font: Option<Box<dyn TextRenderer>>,
    sun_icon: Icon,
    moon_icon: Icon,
    label: String,
}

impl std::fmt::Debug for RadarCompass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarCompass")
            .field("enabled", &self.enabled)
            .field("rings", &self.config.rings.distances)
            .field("labels", &self.label_font.is_some())
            .field("cardinals", &self.cardinal_font.is_some())
            .finish()
    }
}

impl RadarCompass {
    /// Load fonts and icons; any that fail only disable their own layer.
    pub fn new(
        config: &RadarCompassConfig,
        celestial: &CelestialIndicatorsConfig,
        stream: StreamVariant,
        resources: &ResourcePaths,
    ) -> Self {
        if !config.enabled {
            info!("Radar compass disabled in config");
            return Self::with_renderers(config, celestial, stream, None, None, None, None);
        }
        let label_font = load_font(resources, config.rings.label_font, "radar_compass");
        let cardinal_font = load_font(resources, config.cardinals.font, "radar_compass");
        let sun = celestial.sun_svg.as_ref().map(|p| resources.resolve(p));
        let moon = celestial.moon_svg.as_ref().map(|p| resources.resolve(p));

        Self::with_renderers(
            config,
            celestial,
            stream,
            label_font,
            cardinal_font,
            Some(Icon::load_or_disc(sun.as_deref(), celestial.sun_color)),
            Some(Icon::load_or_disc(moon.as_deref(), celestial.moon_color)),
        )
    }

    /// Build from already loaded renderers. Missing icons become discs.
    #[allow(clippy::too_many_arguments)]
    pub fn with_renderers(
        config: &RadarCompassConfig,
        celestial: &CelestialIndicatorsConfig,
        stream: StreamVariant,
        label_font: Option<Box<dyn TextRenderer>>,
        cardinal_font: Option<Box<dyn TextRenderer>>,
        sun_icon: Option<Icon>,
        moon_icon: Option<Icon>,
    ) -> Self {
        let mut config = config.clone();
        config.rings.distances.truncate(osd_common::config::MAX_RADAR_RINGS);

        if config.enabled {
            info!(
                x = config.position_x,
                y = config.position_y,
                size = config.size,
                rings = config.rings.distances.len(),
                "Radar compass ready"
            );
        }

        Self {
            enabled: config.enabled,
            sun_icon: sun_icon.unwrap_or_else(|| Icon::load_or_disc(None, celestial.sun_color)),
            moon_icon: moon_icon.unwrap_or_else(|| Icon::load_or_disc(None, celestial.moon_color)),
            config,
            celestial: celestial.clone(),
            stream,
            label_font,
            cardinal_font,
            label: String::with_capacity(16),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Draw one frame. Returns `true` when the widget is enabled.
    pub fn render(
        &mut self,
        fb: &mut Framebuffer,
        snapshot: &TelemetrySnapshot,
        positions: Option<&CelestialPositions>,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let azimuth = snapshot.orientation.map_or(0.0, |o| o.azimuth as f32);
        let geometry = RadarGeometry::new(&self.config, azimuth);

        self.draw_rings(fb, &geometry);
        self.draw_ring_labels(fb, &geometry);
        if let Some(fov) = resolve_fov(snapshot.camera_fov(self.stream)) {
            self.draw_fov_wedge(fb, &geometry, fov);
        }
        self.draw_cardinals(fb, &geometry);
        if let Some(positions) = positions {
            self.draw_celestial(fb, &geometry, positions);
        }
        true
    }

    fn max_distance(&self) -> Option<f32> {
        self.config
            .rings
            .distances
            .iter()
            .copied()
            .fold(None, |max, d| Some(max.map_or(d, |m: f32| m.max(d))))
            .filter(|m| *m > 0.0)
    }

    fn draw_rings(&self, fb: &mut Framebuffer, g: &RadarGeometry) {
        let Some(max) = self.max_distance() else {
            return;
        };
        let rings = &self.config.rings;
        for &distance in &rings.distances {
            let scale = distance / max;
            draw_ellipse_outline(
                fb,
                g.cx,
                g.cy,
                g.radius_x * scale,
                g.radius_y * scale,
                rings.color,
                rings.thickness,
            );
        }
    }

    fn draw_ring_labels(&mut self, fb: &mut Framebuffer, g: &RadarGeometry) {
        if !self.config.rings.show_labels {
            return;
        }
        let Some(max) = self.max_distance() else {
            return;
        };
        let Some(font) = self.label_font.as_deref() else {
            return;
        };
        let rings = &self.config.rings;
        let font_size = rings.label_font_size as f32;
        let bearing = LABEL_BEARING.to_radians();

        for &distance in &rings.distances {
            let scale = distance / max;
            // Labels stay on the right-hand rim regardless of heading
            let ax = g.cx + (g.radius_x * scale * bearing.sin()) as i32;
            let ay = g.cy - (g.radius_y * scale * bearing.cos()) as i32;

            format_distance(&mut self.label, distance);
            let width = font.measure_width(&self.label, font_size);
            font.draw_text(
                fb,
                &self.label,
                ax - width / 2 + LABEL_NUDGE_X,
                ay - rings.label_font_size as i32 / 2,
                font_size,
                rings.color,
                Some(TextOutline::BLACK_1PX),
            );
        }
    }

    fn draw_fov_wedge(&self, fb: &mut Framebuffer, g: &RadarGeometry, fov: f32) {
        let wedge = &self.config.fov_wedge;
        let start = CompassAngle(-fov / 2.0);
        let end = CompassAngle(fov / 2.0);
        draw_ellipse_wedge_filled(fb, g.cx, g.cy, g.radius_x, g.radius_y, start, end, wedge.fill_color);
        draw_ellipse_wedge_outline(
            fb,
            g.cx,
            g.cy,
            g.radius_x,
            g.radius_y,
            start,
            end,
            wedge.outline_color,
            wedge.outline_thickness,
        );
    }

    fn draw_cardinals(&self, fb: &mut Framebuffer, g: &RadarGeometry) {
        let Some(font) = self.cardinal_font.as_deref() else {
            return;
        };
        let cardinals = &self.config.cardinals;
        let font_size = cardinals.font_size as f32;

        for (letter, bearing) in CARDINALS {
            let (ax, ay) = g.point(bearing, CARDINAL_RADIUS_FACTOR);
            font.draw_text(
                fb,
                letter,
                centered_x(font, letter, font_size, ax),
                ay - cardinals.font_size as i32 / 2,
                font_size,
                cardinals.color,
                Some(TextOutline::BLACK_1PX),
            );
        }
    }

    fn draw_celestial(&mut self, fb: &mut Framebuffer, g: &RadarGeometry, positions: &CelestialPositions) {
        if !self.celestial.enabled {
            return;
        }
        let threshold = self.celestial.visibility_threshold as f64;
        let base_size = self.config.size / 8;
        let scale = self.celestial.scale;

        let bodies = [
            (Body::Sun, self.celestial.show_sun, &mut self.sun_icon),
            (Body::Moon, self.celestial.show_moon, &mut self.moon_icon),
        ];
        for (body, shown, icon) in bodies {
            if !shown {
                continue;
            }
            let Some(pos) = positions.get(body) else {
                continue;
            };
            if !is_visible(pos.altitude, threshold) {
                continue;
            }
            draw_rim_marker(fb, g, icon, &pos, base_size, scale);
        }
    }
}

fn draw_rim_marker(
    fb: &mut Framebuffer,
    g: &RadarGeometry,
    icon: &mut Icon,
    pos: &HorizontalPosition,
    base_size: i32,
    indicator_scale: f32,
) {
    let (x, y) = g.point(pos.azimuth as f32, CELESTIAL_RADIUS_FACTOR);
    let (scale, alpha) = altitude_style(pos.altitude);
    let size = ((base_size as f32 * scale * indicator_scale) as i32).max(MIN_INDICATOR_SIZE);
    icon.draw(fb, x - size / 2, y - size / 2, size as u32, size as u32, alpha);
}
