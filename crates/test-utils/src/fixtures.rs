//! Telemetry snapshots for common platform states.

use osd_common::{
    CameraState, GpsFix, Orientation, RotarySpeeds, TelemetrySnapshot, TimeState,
};

/// 2024-06-21 12:00:00 UTC, the June solstice.
pub const SOLSTICE_NOON_UTC: i64 = 1_718_971_200;

/// Greenwich, near sea level.
pub const LONDON: (f64, f64) = (51.5, 0.0);

/// Level platform pointing north with both camera FOVs set.
pub fn level_north_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        orientation: Some(Orientation::default()),
        camera_day: Some(CameraState {
            horizontal_fov_degrees: 45.0,
        }),
        camera_heat: Some(CameraState {
            horizontal_fov_degrees: 30.0,
        }),
        ..Default::default()
    }
}

/// Platform attitude only.
pub fn oriented_snapshot(azimuth: f64, elevation: f64, bank: f64) -> TelemetrySnapshot {
    TelemetrySnapshot {
        orientation: Some(Orientation {
            azimuth,
            elevation,
            bank,
        }),
        ..level_north_snapshot()
    }
}

/// Observer at Greenwich at solstice noon, platform facing south.
///
/// The Sun is near azimuth 180, altitude about 62 degrees.
pub fn london_solstice_noon_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        gps: Some(GpsFix {
            latitude: LONDON.0,
            longitude: LONDON.1,
            altitude: 10.0,
            timestamp: SOLSTICE_NOON_UTC,
        }),
        time: Some(TimeState {
            timestamp: SOLSTICE_NOON_UTC,
        }),
        ..oriented_snapshot(180.0, 0.0, 0.0)
    }
}

/// Rotary moving with the given normalized speeds.
pub fn moving_rotary_snapshot(azimuth_speed: f64, elevation_speed: f64) -> TelemetrySnapshot {
    TelemetrySnapshot {
        rotary: Some(RotarySpeeds {
            azimuth_speed,
            elevation_speed,
            is_moving: true,
        }),
        ..Default::default()
    }
}

/// JSON wire form of `snapshot`, as accepted by `JsonTelemetryDecoder`.
pub fn snapshot_payload(snapshot: &TelemetrySnapshot) -> Vec<u8> {
    serde_json::to_vec(snapshot).expect("snapshot serializes")
}
