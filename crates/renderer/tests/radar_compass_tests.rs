//! Tests for the radar compass widget.

mod common;

use celestial::{CelestialPositions, HorizontalPosition};
use common::{find, texts, RecordingFont, TextLog};
use osd_common::config::RingsConfig;
use osd_common::{
    CameraState, CelestialIndicatorsConfig, Color, RadarCompassConfig, StreamVariant,
    TelemetrySnapshot,
};
use renderer::{Framebuffer, RadarCompass};
use test_utils::{level_north_snapshot, oriented_snapshot};

/// 200px rose at the origin: center (100, 50), radii 100 × 50.
fn small_config() -> RadarCompassConfig {
    RadarCompassConfig {
        position_x: 0,
        position_y: 0,
        size: 200,
        ..Default::default()
    }
}

struct Fixture {
    radar: RadarCompass,
    labels: TextLog,
    cardinals: TextLog,
}

fn radar_with_fonts(config: &RadarCompassConfig, stream: StreamVariant) -> Fixture {
    let (label_font, labels) = RecordingFont::boxed();
    let (cardinal_font, cardinals) = RecordingFont::boxed();
    let radar = RadarCompass::with_renderers(
        config,
        &CelestialIndicatorsConfig::default(),
        stream,
        Some(label_font),
        Some(cardinal_font),
        None,
        None,
    );
    Fixture {
        radar,
        labels,
        cardinals,
    }
}

fn radar_without_fonts(config: &RadarCompassConfig) -> RadarCompass {
    RadarCompass::with_renderers(
        config,
        &CelestialIndicatorsConfig::default(),
        StreamVariant::Day,
        None,
        None,
        None,
        None,
    )
}

fn with_day_fov(mut snapshot: TelemetrySnapshot, fov: f64) -> TelemetrySnapshot {
    snapshot.camera_day = Some(CameraState {
        horizontal_fov_degrees: fov,
    });
    snapshot
}

fn sun_at(azimuth: f64, altitude: f64) -> CelestialPositions {
    CelestialPositions {
        sun: Some(HorizontalPosition { azimuth, altitude }),
        moon: None,
    }
}

// ============================================================================
// Cardinals
// ============================================================================

#[test]
fn test_cardinals_heading_north() {
    let mut f = radar_with_fonts(&small_config(), StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    assert!(f.radar.render(&mut fb, &level_north_snapshot(), None));

    assert_eq!(texts(&f.cardinals), vec!["N", "E", "S", "W"]);
    let n = find(&f.cardinals, "N").unwrap();
    let e = find(&f.cardinals, "E").unwrap();
    let w = find(&f.cardinals, "W").unwrap();
    assert_eq!(n.center_x(), 100);
    assert!(n.y < 20, "N should be near the top, y={}", n.y);
    assert_eq!(e.center_x(), 185);
    assert_eq!(w.center_x(), 15);
    assert!(n.outlined);
}

#[test]
fn test_heading_east_puts_north_on_the_left() {
    let mut f = radar_with_fonts(&small_config(), StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    f.radar.render(&mut fb, &oriented_snapshot(90.0, 0.0, 0.0), None);

    let n = find(&f.cardinals, "N").unwrap();
    let e = find(&f.cardinals, "E").unwrap();
    assert_eq!(n.center_x(), 15);
    assert_eq!(e.center_x(), 100);
    assert!(e.y < 20);
}

#[test]
fn test_missing_fonts_still_draw_rings() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    assert!(radar.render(&mut fb, &with_day_fov(level_north_snapshot(), 0.0), None));

    // Bottom of the outer ring
    assert!(fb.pixel(100, 100).unwrap().a() > 0);
}

// ============================================================================
// Ring labels
// ============================================================================

#[test]
fn test_ring_labels_text_and_position() {
    let config = RadarCompassConfig {
        rings: RingsConfig {
            distances: vec![0.5, 5.0, 20.0],
            ..Default::default()
        },
        ..small_config()
    };
    let mut f = radar_with_fonts(&config, StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    f.radar.render(&mut fb, &level_north_snapshot(), None);

    assert_eq!(texts(&f.labels), vec!["500m", "5km", "20km"]);

    // Outer ring anchor (200, 50), 24px wide text nudged 5px right
    let outer = find(&f.labels, "20km").unwrap();
    assert_eq!((outer.x, outer.y), (193, 44));
    assert_eq!(outer.color, config.rings.color);

    let inner = find(&f.labels, "500m").unwrap();
    let middle = find(&f.labels, "5km").unwrap();
    assert!(inner.center_x() < middle.center_x());
    assert!(middle.center_x() < outer.center_x());
}

#[test]
fn test_ring_labels_ignore_heading() {
    let mut f = radar_with_fonts(&small_config(), StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    f.radar.render(&mut fb, &oriented_snapshot(137.0, 0.0, 0.0), None);

    let outer = find(&f.labels, "20km").unwrap();
    assert_eq!((outer.x, outer.y), (193, 44));
}

#[test]
fn test_ring_labels_can_be_hidden() {
    let config = RadarCompassConfig {
        rings: RingsConfig {
            show_labels: false,
            ..Default::default()
        },
        ..small_config()
    };
    let mut f = radar_with_fonts(&config, StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    f.radar.render(&mut fb, &level_north_snapshot(), None);

    assert!(f.labels.borrow().is_empty());
    assert_eq!(f.cardinals.borrow().len(), 4);
}

#[test]
fn test_extra_rings_are_dropped() {
    let config = RadarCompassConfig {
        rings: RingsConfig {
            distances: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            ..Default::default()
        },
        ..small_config()
    };
    let mut f = radar_with_fonts(&config, StreamVariant::Day);
    let mut fb = Framebuffer::new(220, 120).unwrap();
    f.radar.render(&mut fb, &level_north_snapshot(), None);

    assert_eq!(texts(&f.labels), vec!["1km", "2km", "3km", "4km", "5km"]);
}

// ============================================================================
// FOV wedge
// ============================================================================

#[test]
fn test_fov_wedge_points_up() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    radar.render(&mut fb, &with_day_fov(level_north_snapshot(), 45.0), None);

    let inside = fb.pixel(100, 30).unwrap();
    assert_eq!(inside.g(), 255);
    assert!(inside.a() > 0);
    assert_eq!(fb.pixel(160, 30), Some(Color::TRANSPARENT));
}

#[test]
fn test_fov_wedge_default_without_camera() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    radar.render(&mut fb, &TelemetrySnapshot::default(), None);

    assert!(fb.pixel(100, 30).unwrap().a() > 0);
}

#[test]
fn test_fov_wedge_suppressed_by_zero_fov() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    radar.render(&mut fb, &with_day_fov(level_north_snapshot(), 0.0), None);

    assert_eq!(fb.pixel(100, 30), Some(Color::TRANSPARENT));
}

#[test]
fn test_fov_wedge_uses_stream_camera() {
    let radar_config = small_config();
    let mut radar = RadarCompass::with_renderers(
        &radar_config,
        &CelestialIndicatorsConfig::default(),
        StreamVariant::Thermal,
        None,
        None,
        None,
        None,
    );
    // Day camera reports a FOV, thermal reports none
    let mut snapshot = with_day_fov(level_north_snapshot(), 90.0);
    snapshot.camera_heat = Some(CameraState {
        horizontal_fov_degrees: 0.0,
    });
    let mut fb = Framebuffer::new(220, 120).unwrap();
    radar.render(&mut fb, &snapshot, None);

    assert_eq!(fb.pixel(100, 30), Some(Color::TRANSPARENT));
}

// ============================================================================
// Celestial markers
// ============================================================================

#[test]
fn test_sun_marker_on_rim() {
    let mut radar = radar_without_fonts(&small_config());
    let sun_color = CelestialIndicatorsConfig::default().sun_color;
    let mut fb = Framebuffer::new(220, 120).unwrap();
    let snapshot = with_day_fov(level_north_snapshot(), 0.0);
    radar.render(&mut fb, &snapshot, Some(&sun_at(90.0, 30.0)));

    assert_eq!(fb.pixel(190, 50), Some(sun_color));
}

#[test]
fn test_sun_marker_rotates_with_heading() {
    let mut radar = radar_without_fonts(&small_config());
    let sun_color = CelestialIndicatorsConfig::default().sun_color;
    let mut fb = Framebuffer::new(220, 120).unwrap();
    let snapshot = with_day_fov(oriented_snapshot(90.0, 0.0, 0.0), 0.0);
    radar.render(&mut fb, &snapshot, Some(&sun_at(90.0, 30.0)));

    assert_eq!(fb.pixel(100, 5), Some(sun_color));
    assert_ne!(fb.pixel(190, 50), Some(sun_color));
}

#[test]
fn test_sun_below_horizon_is_faded() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    let snapshot = with_day_fov(level_north_snapshot(), 0.0);
    radar.render(&mut fb, &snapshot, Some(&sun_at(90.0, -3.0)));

    let alpha = fb.pixel(190, 50).unwrap().a();
    assert!((120..=126).contains(&alpha), "alpha {}", alpha);
}

#[test]
fn test_sun_below_threshold_is_hidden() {
    let mut radar = radar_without_fonts(&small_config());
    let mut fb = Framebuffer::new(220, 120).unwrap();
    let snapshot = with_day_fov(level_north_snapshot(), 0.0);
    radar.render(&mut fb, &snapshot, Some(&sun_at(90.0, -10.0)));

    assert_eq!(fb.pixel(190, 50), Some(Color::TRANSPARENT));
}

// ============================================================================
// Enable/disable
// ============================================================================

#[test]
fn test_disabled_radar_draws_nothing() {
    let config = RadarCompassConfig {
        enabled: false,
        ..small_config()
    };
    let mut f = radar_with_fonts(&config, StreamVariant::Day);
    assert!(!f.radar.is_enabled());

    let mut fb = Framebuffer::new(220, 120).unwrap();
    assert!(!f.radar.render(&mut fb, &level_north_snapshot(), Some(&sun_at(0.0, 10.0))));
    assert_eq!(fb.count_drawn(), 0);
    assert!(f.cardinals.borrow().is_empty());
}
