//! Read-only telemetry snapshot consumed by the widgets.
//!
//! Each section is optional; a widget whose section is missing skips the
//! frame instead of failing.

use serde::{Deserialize, Serialize};

use crate::config::StreamVariant;
use crate::error::{OsdError, OsdResult};

/// One decoded platform state update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySnapshot {
    pub orientation: Option<Orientation>,
    pub rotary: Option<RotarySpeeds>,
    pub camera_day: Option<CameraState>,
    pub camera_heat: Option<CameraState>,
    pub gps: Option<GpsFix>,
    pub crosshair_offsets: Option<CrosshairOffsets>,
    pub time: Option<TimeState>,
}

/// Platform attitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    /// Heading, 0 = North, clockwise
    pub azimuth: f64,
    /// Pitch, positive = nose up
    pub elevation: f64,
    /// Roll, positive = right side down
    pub bank: f64,
}

/// Rotary platform speeds, normalized to -1..1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotarySpeeds {
    pub azimuth_speed: f64,
    pub elevation_speed: f64,
    pub is_moving: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    pub horizontal_fov_degrees: f64,
}

/// Observer position and the time it was sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above the ellipsoid
    pub altitude: f64,
    /// Unix seconds
    pub timestamp: i64,
}

/// Operator-adjusted crosshair offsets in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairOffsets {
    pub day_horizontal: i32,
    pub day_vertical: i32,
    pub heat_horizontal: i32,
    pub heat_vertical: i32,
    pub heat_osd_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeState {
    /// Unix seconds
    pub timestamp: i64,
}

impl TelemetrySnapshot {
    /// Horizontal field of view of the camera feeding `stream`.
    pub fn camera_fov(&self, stream: StreamVariant) -> Option<f64> {
        let camera = match stream {
            StreamVariant::Day => self.camera_day,
            StreamVariant::Thermal => self.camera_heat,
        };
        camera.map(|c| c.horizontal_fov_degrees)
    }

    /// Timestamp for astronomical calculations, preferring the GPS fix.
    pub fn observation_timestamp(&self) -> Option<i64> {
        self.gps
            .map(|g| g.timestamp)
            .filter(|ts| *ts > 0)
            .or_else(|| self.time.map(|t| t.timestamp).filter(|ts| *ts > 0))
    }

    /// Crosshair offset for whichever camera currently owns the OSD.
    pub fn crosshair_offset(&self) -> (i32, i32) {
        match self.crosshair_offsets {
            Some(o) if o.heat_osd_enabled => (o.heat_horizontal, o.heat_vertical),
            Some(o) => (o.day_horizontal, o.day_vertical),
            None => (0, 0),
        }
    }
}

/// Turns a raw state payload into a snapshot.
///
/// The wire format belongs to the host; the engine only sees the result.
pub trait TelemetryDecoder {
    fn decode(&self, payload: &[u8]) -> OsdResult<TelemetrySnapshot>;
}

/// Decoder for JSON-encoded snapshots, used by headless tools and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTelemetryDecoder;

impl TelemetryDecoder for JsonTelemetryDecoder {
    fn decode(&self, payload: &[u8]) -> OsdResult<TelemetrySnapshot> {
        serde_json::from_slice(payload).map_err(|e| OsdError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_snapshot() {
        let payload = br#"{
            "orientation": {"azimuth": 90.0, "elevation": 5.0},
            "camera_day": {"horizontal_fov_degrees": 30.0},
            "gps": {"latitude": 48.1, "longitude": 11.6, "timestamp": 1718971200}
        }"#;
        let snapshot = JsonTelemetryDecoder.decode(payload).unwrap();

        let orientation = snapshot.orientation.unwrap();
        assert_eq!(orientation.azimuth, 90.0);
        assert_eq!(orientation.bank, 0.0);
        assert!(snapshot.rotary.is_none());
        assert_eq!(snapshot.camera_fov(StreamVariant::Day), Some(30.0));
        assert_eq!(snapshot.camera_fov(StreamVariant::Thermal), None);
        assert_eq!(snapshot.observation_timestamp(), Some(1_718_971_200));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let err = JsonTelemetryDecoder.decode(b"\x08\x96\x01").unwrap_err();
        assert!(matches!(err, OsdError::Decode(_)));
    }

    #[test]
    fn test_observation_timestamp_falls_back_to_time_section() {
        let snapshot = TelemetrySnapshot {
            gps: Some(GpsFix::default()),
            time: Some(TimeState { timestamp: 1_700_000_000 }),
            ..Default::default()
        };
        assert_eq!(snapshot.observation_timestamp(), Some(1_700_000_000));
        assert_eq!(TelemetrySnapshot::default().observation_timestamp(), None);
    }

    #[test]
    fn test_crosshair_offset_follows_active_camera() {
        let mut snapshot = TelemetrySnapshot {
            crosshair_offsets: Some(CrosshairOffsets {
                day_horizontal: 4,
                day_vertical: -2,
                heat_horizontal: 10,
                heat_vertical: 12,
                heat_osd_enabled: false,
            }),
            ..Default::default()
        };
        assert_eq!(snapshot.crosshair_offset(), (4, -2));

        if let Some(offsets) = snapshot.crosshair_offsets.as_mut() {
            offsets.heat_osd_enabled = true;
        }
        assert_eq!(snapshot.crosshair_offset(), (10, 12));
    }
}
