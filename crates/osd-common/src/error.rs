//! Error types for the OSD engine.

use thiserror::Error;

/// Result type alias using OsdError.
pub type OsdResult<T> = Result<T, OsdError>;

/// Primary error type for OSD initialization and state handling.
///
/// Render paths never return these; a widget that fails to initialize is
/// disabled and the error is logged instead.
#[derive(Debug, Error)]
pub enum OsdError {
    // === Configuration Errors ===
    #[error("Failed to read config: {0}")]
    ConfigRead(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    // === Resource Errors ===
    #[error("Failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },

    #[error("Failed to load font '{path}': {reason}")]
    FontLoad { path: String, reason: String },

    #[error("Failed to load icon '{path}': {reason}")]
    IconLoad { path: String, reason: String },

    #[error("Unknown font name: {0}")]
    UnknownFont(String),

    // === Buffer Errors ===
    #[error("Framebuffer {width}x{height} exceeds capacity of {capacity} pixels")]
    FramebufferCapacity {
        width: u32,
        height: u32,
        capacity: usize,
    },

    #[error("Lookup table allocation failed for diameter {0}")]
    LutAllocation(u32),

    #[error("State payload of {requested} bytes exceeds buffer capacity of {capacity} bytes")]
    StateOverflow { requested: usize, capacity: usize },

    #[error("Empty state payload")]
    EmptyState,

    // === Telemetry Errors ===
    #[error("Failed to decode telemetry: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl OsdError {
    /// Whether the error happened while loading an asset at widget init.
    pub fn is_init_failure(&self) -> bool {
        matches!(
            self,
            OsdError::TextureLoad { .. }
                | OsdError::FontLoad { .. }
                | OsdError::IconLoad { .. }
                | OsdError::UnknownFont(_)
                | OsdError::LutAllocation(_)
        )
    }
}

impl From<std::io::Error> for OsdError {
    fn from(err: std::io::Error) -> Self {
        OsdError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OsdError {
    fn from(err: serde_json::Error) -> Self {
        OsdError::ConfigParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_failure_classification() {
        let err = OsdError::TextureLoad {
            path: "skins/stock.png".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.is_init_failure());
        assert!(OsdError::LutAllocation(200).is_init_failure());

        let err = OsdError::StateOverflow {
            requested: 5000,
            capacity: 4096,
        };
        assert!(!err.is_init_failure());
    }

    #[test]
    fn test_error_messages() {
        let err = OsdError::FramebufferCapacity {
            width: 4000,
            height: 3000,
            capacity: 1920 * 1080,
        };
        assert_eq!(
            err.to_string(),
            "Framebuffer 4000x3000 exceeds capacity of 2073600 pixels"
        );
    }
}
