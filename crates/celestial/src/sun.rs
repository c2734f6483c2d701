//! Apparent solar position from the low-precision solar theory.
//!
//! Accuracy is around 0.01°, which is a fraction of a pixel on any
//! indicator the OSD draws.

use crate::coords::{normalize_degrees, EclipticCoords, Nutation};

const AU_KM: f64 = 149_597_870.7;

/// Constant of aberration in degrees, scaled by distance in AU.
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Apparent ecliptic position of the Sun for Julian centuries `t` (TT).
///
/// Includes nutation in longitude and annual aberration.
pub fn apparent_position(t: f64, nutation: &Nutation) -> EclipticCoords {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m = mean_anomaly.to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_longitude = mean_longitude + center;
    let true_anomaly = (mean_anomaly + center).to_radians();
    let distance_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    EclipticCoords {
        longitude: normalize_degrees(
            true_longitude + nutation.longitude - ABERRATION_DEG / distance_au,
        ),
        latitude: 0.0,
        distance_km: distance_au * AU_KM,
    }
}
