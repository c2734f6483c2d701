//! Shared test utilities for the OSD rendering workspace.
//!
//! - Resource path helpers and skip macros for optional fonts/skins
//! - Synthetic equirectangular navball textures
//! - Telemetry snapshot fixtures
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

#[doc(hidden)]
pub use osd_common;

/// Skip a test when a resource file is not available.
///
/// ```ignore
/// use test_utils::require_test_file;
///
/// #[test]
/// fn test_real_font() {
///     let path = require_test_file!("fonts/DejaVuSans.ttf");
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Test file '{}' not found. Install OSD resources or set TEST_DATA_DIR.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Approximate floating-point equality.
///
/// ```ignore
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Per-channel equality of two packed colors within `tolerance` levels.
///
/// ```ignore
/// assert_color_near!(fb.pixel(10, 10).unwrap(), Color::from_rgba(242, 0, 0, 255), 1);
/// ```
#[macro_export]
macro_rules! assert_color_near {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: $crate::osd_common::Color = $left;
        let right: $crate::osd_common::Color = $right;
        let tolerance: i32 = $tolerance as i32;
        let channels = |c: $crate::osd_common::Color| [c.r() as i32, c.g() as i32, c.b() as i32, c.a() as i32];
        let (l, r) = (channels(left), channels(right));
        if l.iter().zip(r.iter()).any(|(a, b)| (a - b).abs() > tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)` colors\n  left: `{:?}`,\n right: `{:?}`,\n  tolerance: {}",
                l, r, tolerance
            );
        }
    }};
}
