//! Common types shared by the OSD rendering crates.
//!
//! Holds the packed color format, the angle convention tags, the typed
//! configuration schema, the telemetry snapshot consumed by widgets, and
//! the error taxonomy.

pub mod angle;
pub mod color;
pub mod config;
pub mod error;
pub mod resources;
pub mod telemetry;
pub mod time;

pub use angle::{CompassAngle, MathAngle};
pub use color::Color;
pub use config::{
    CelestialIndicatorsConfig, CrosshairConfig, CrosshairOrientation, NavballConfig, OsdConfig,
    RadarCompassConfig, SpeedIndicatorsConfig, StreamVariant, TimestampConfig,
};
pub use error::{OsdError, OsdResult};
pub use resources::{FontName, NavballSkin, ResourcePaths};
pub use telemetry::{
    CameraState, CrosshairOffsets, GpsFix, JsonTelemetryDecoder, Orientation, RotarySpeeds,
    TelemetryDecoder, TelemetrySnapshot, TimeState,
};
