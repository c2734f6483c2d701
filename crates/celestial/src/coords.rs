//! Coordinate frames and the transforms between them.
//!
//! All angles are degrees unless a name says otherwise. The chain used for
//! each body is ecliptic of date → true equator of date → topocentric
//! equatorial → horizontal, with refraction applied last.

use nalgebra::Vector3;

/// Equatorial Earth radius used for parallax, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Polar/equatorial axis ratio (IAU 1976).
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Geodetic observer position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObserverLocation {
    /// Degrees, north positive
    pub latitude: f64,
    /// Degrees, east positive
    pub longitude: f64,
    /// Metres above sea level
    pub altitude: f64,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Position on the ecliptic of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoords {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
}

/// Position on the true equator of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    pub right_ascension: f64,
    pub declination: f64,
    pub distance_km: f64,
}

/// Topocentric azimuth/altitude of a body.
///
/// Azimuth runs 0..360 from North through East; altitude is −90..90 with
/// 0 on the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

impl HorizontalPosition {
    /// Unit vector in the observer's East/Up/North frame.
    pub fn to_vector(self) -> Vector3<f64> {
        horizontal_to_vector(self.azimuth, self.altitude)
    }
}

/// Nutation in longitude and obliquity, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

impl Nutation {
    /// Four-term series, accurate to about half an arcsecond.
    pub fn at(t: f64) -> Self {
        let node = (125.044_52 - 1_934.136_261 * t).to_radians();
        let sun_mean = (280.4665 + 36_000.7698 * t).to_radians();
        let moon_mean = (218.3165 + 481_267.8813 * t).to_radians();

        let longitude = -17.20 * node.sin() - 1.32 * (2.0 * sun_mean).sin()
            - 0.23 * (2.0 * moon_mean).sin()
            + 0.21 * (2.0 * node).sin();
        let obliquity = 9.20 * node.cos()
            + 0.57 * (2.0 * sun_mean).cos()
            + 0.10 * (2.0 * moon_mean).cos()
            - 0.09 * (2.0 * node).cos();

        Self {
            longitude: longitude / 3600.0,
            obliquity: obliquity / 3600.0,
        }
    }
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(t: f64) -> f64 {
    23.439_291_1 + (-46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t) / 3600.0
}

/// Fold an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Rotate ecliptic coordinates onto the equator for obliquity `epsilon`.
pub fn ecliptic_to_equatorial(ecliptic: EclipticCoords, epsilon: f64) -> EquatorialCoords {
    let lambda = ecliptic.longitude.to_radians();
    let beta = ecliptic.latitude.to_radians();
    let eps = epsilon.to_radians();

    let ra = (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos());
    let dec = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin()).asin();

    EquatorialCoords {
        right_ascension: normalize_degrees(ra.to_degrees()),
        declination: dec.to_degrees(),
        distance_km: ecliptic.distance_km,
    }
}

/// Topocentric hour angle and declination, both degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricCoords {
    pub hour_angle: f64,
    pub declination: f64,
}

/// Shift a geocentric position to the observer's location on the surface.
///
/// Negligible for the Sun, but the Moon moves by up to a degree.
pub fn topocentric(
    geocentric: EquatorialCoords,
    hour_angle: f64,
    observer: &ObserverLocation,
) -> TopocentricCoords {
    let phi = observer.latitude.to_radians();
    let height = observer.altitude / (EARTH_RADIUS_KM * 1000.0);

    let u = (EARTH_AXIS_RATIO * phi.tan()).atan();
    let rho_sin = EARTH_AXIS_RATIO * u.sin() + height * phi.sin();
    let rho_cos = u.cos() + height * phi.cos();

    let sin_parallax = EARTH_RADIUS_KM / geocentric.distance_km;
    let h = hour_angle.to_radians();
    let dec = geocentric.declination.to_radians();

    let denom = dec.cos() - rho_cos * sin_parallax * h.cos();
    let delta_ra = (-rho_cos * sin_parallax * h.sin()).atan2(denom);
    let dec_topo = ((dec.sin() - rho_sin * sin_parallax) * delta_ra.cos()).atan2(denom);

    TopocentricCoords {
        hour_angle: (h - delta_ra).to_degrees(),
        declination: dec_topo.to_degrees(),
    }
}

/// Geometric azimuth (from North) and altitude for a local hour angle.
pub fn equatorial_to_horizontal(
    hour_angle: f64,
    declination: f64,
    latitude: f64,
) -> HorizontalPosition {
    let h = hour_angle.to_radians();
    let dec = declination.to_radians();
    let phi = latitude.to_radians();

    // atan2 yields azimuth from South; shift to North-based
    let azimuth_south = h
        .sin()
        .atan2(h.cos() * phi.sin() - dec.tan() * phi.cos());
    let altitude = (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin();

    HorizontalPosition {
        azimuth: normalize_degrees(azimuth_south.to_degrees() + 180.0),
        altitude: altitude.to_degrees(),
    }
}

/// Standard atmospheric refraction in degrees for a geometric altitude.
///
/// Saemundsson-style formula, held constant below −1° and tapered to zero
/// at the nadir.
pub fn refraction(altitude: f64) -> f64 {
    if !(-90.0..=90.0).contains(&altitude) {
        return 0.0;
    }
    let hd = altitude.max(-1.0);
    let mut refr = (1.02 / (hd + 10.3 / (hd + 5.11)).to_radians().tan()) / 60.0;
    if altitude < -1.0 {
        refr *= (altitude + 90.0) / 89.0;
    }
    refr
}

/// Horizontal coordinates to a unit vector: x = East, y = Up, z = North.
pub fn horizontal_to_vector(azimuth: f64, altitude: f64) -> Vector3<f64> {
    let az = azimuth.to_radians();
    let alt = altitude.to_radians();
    Vector3::new(alt.cos() * az.sin(), alt.sin(), alt.cos() * az.cos())
}
