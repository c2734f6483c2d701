//! Telemetry-driven OSD rendering.
//!
//! Draws the overlay widgets into a fixed-capacity RGBA framebuffer:
//! - Crosshair with rotary speed readouts
//! - UTC timestamp
//! - Navball (textured attitude sphere)
//! - Radar compass with FOV wedge
//!
//! [`OsdContext`] owns the framebuffer and widgets and decides when a new
//! frame is needed.

pub mod context;
pub mod crosshair;
pub mod framebuffer;
pub mod icon;
pub mod navball;
pub mod primitives;
pub mod radar_compass;
pub mod state_buffer;
pub mod text;
pub mod texture;
pub mod timestamp;

pub use context::{OsdContext, Widgets};
pub use framebuffer::Framebuffer;
pub use navball::Navball;
pub use radar_compass::RadarCompass;
pub use text::{FontResource, TextOutline, TextRenderer};
pub use texture::Texture;
