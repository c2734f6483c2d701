//! Topocentric Sun and Moon positions for OSD indicators.
//!
//! Given a Unix timestamp and an observer, [`calculate_positions`] returns
//! the azimuth/altitude of each body as seen from that observer, with
//! standard refraction applied. Bodies are computed independently: a
//! failure for one leaves the other intact.

pub mod coords;
pub mod moon;
pub mod sun;
pub mod time;

pub use coords::{horizontal_to_vector, HorizontalPosition, ObserverLocation};

use thiserror::Error;
use tracing::debug;

use coords::{
    ecliptic_to_equatorial, equatorial_to_horizontal, mean_obliquity, normalize_degrees,
    refraction, topocentric, Nutation,
};

/// Errors from a single body's position computation.
#[derive(Debug, Error, PartialEq)]
pub enum CelestialError {
    #[error("Invalid observer location: lat={latitude}, lon={longitude}, alt={altitude}")]
    InvalidObserver {
        latitude: f64,
        longitude: f64,
        altitude: f64,
    },

    #[error("Computation for {0:?} produced a non-finite result")]
    NonFinite(Body),
}

/// Bodies the calculator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

/// Per-frame result; `None` marks a body whose computation failed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CelestialPositions {
    pub sun: Option<HorizontalPosition>,
    pub moon: Option<HorizontalPosition>,
}

impl CelestialPositions {
    pub fn get(&self, body: Body) -> Option<HorizontalPosition> {
        match body {
            Body::Sun => self.sun,
            Body::Moon => self.moon,
        }
    }
}

/// Whether a body at `altitude` clears the visibility threshold.
///
/// A body exactly at the threshold counts as visible.
pub fn is_visible(altitude: f64, threshold: f64) -> bool {
    altitude >= threshold
}

/// Compute Sun and Moon positions for one frame.
pub fn calculate_positions(unix_seconds: i64, observer: ObserverLocation) -> CelestialPositions {
    let days = time::days_since_j2000(unix_seconds);
    let position = |body| match body_position(body, days, &observer) {
        Ok(pos) => Some(pos),
        Err(e) => {
            debug!(body = ?body, error = %e, "Celestial position unavailable");
            None
        }
    };

    CelestialPositions {
        sun: position(Body::Sun),
        moon: position(Body::Moon),
    }
}

/// Topocentric horizontal position of `body` at `days` since J2000.0 (UT).
pub fn body_position(
    body: Body,
    days: f64,
    observer: &ObserverLocation,
) -> Result<HorizontalPosition, CelestialError> {
    if !observer.latitude.is_finite()
        || !observer.longitude.is_finite()
        || !observer.altitude.is_finite()
        || observer.latitude.abs() > 90.0
    {
        return Err(CelestialError::InvalidObserver {
            latitude: observer.latitude,
            longitude: observer.longitude,
            altitude: observer.altitude,
        });
    }
    if !days.is_finite() {
        return Err(CelestialError::NonFinite(body));
    }

    let t = time::centuries_tt(days);
    let nutation = Nutation::at(t);
    let epsilon = mean_obliquity(t) + nutation.obliquity;

    let ecliptic = match body {
        Body::Sun => sun::apparent_position(t, &nutation),
        Body::Moon => moon::apparent_position(t, &nutation),
    };
    let equatorial = ecliptic_to_equatorial(ecliptic, epsilon);

    let sidereal = time::greenwich_mean_sidereal_degrees(days)
        + nutation.longitude * epsilon.to_radians().cos();
    let hour_angle = normalize_degrees(sidereal + observer.longitude - equatorial.right_ascension);

    let topo = topocentric(equatorial, hour_angle, observer);
    let geometric = equatorial_to_horizontal(topo.hour_angle, topo.declination, observer.latitude);

    let position = HorizontalPosition {
        azimuth: geometric.azimuth,
        altitude: geometric.altitude + refraction(geometric.altitude),
    };
    if position.azimuth.is_finite() && position.altitude.is_finite() {
        Ok(position)
    } else {
        Err(CelestialError::NonFinite(body))
    }
}
