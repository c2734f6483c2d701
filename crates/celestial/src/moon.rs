//! Geocentric lunar position from a truncated periodic-term series.
//!
//! Only the largest terms are kept (those above about 0.002° in
//! longitude), which holds the error near 0.01°. That is well inside the
//! indicator size even on the largest navball.

use crate::coords::{normalize_degrees, EclipticCoords, Nutation};

/// Multipliers of D, M, M', F with the longitude (1e-6 °) and distance
/// (1e-3 km) coefficients.
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

/// Multipliers of D, M, M', F with the latitude coefficient (1e-6 °).
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 20] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
];

const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Fundamental arguments in degrees.
struct Arguments {
    mean_longitude: f64,
    elongation: f64,
    sun_anomaly: f64,
    moon_anomaly: f64,
    latitude_argument: f64,
    eccentricity_factor: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            mean_longitude: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2
                + t3 / 538_841.0
                - t4 / 65_194_000.0,
            elongation: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2
                + t3 / 545_868.0
                - t4 / 113_065_000.0,
            sun_anomaly: 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2
                + t3 / 24_490_000.0,
            moon_anomaly: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2
                + t3 / 69_699.0
                - t4 / 14_712_000.0,
            latitude_argument: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
                - t3 / 3_526_000.0
                + t4 / 863_310_000.0,
            eccentricity_factor: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Argument of one periodic term in radians and its eccentricity weight.
    fn term(&self, d: i8, m: i8, mp: i8, f: i8) -> (f64, f64) {
        let angle = d as f64 * self.elongation
            + m as f64 * self.sun_anomaly
            + mp as f64 * self.moon_anomaly
            + f as f64 * self.latitude_argument;
        let weight = self.eccentricity_factor.powi(m.unsigned_abs() as i32);
        (angle.to_radians(), weight)
    }
}

/// Geometric geocentric position (mean equinox of date) for centuries `t`.
pub fn geocentric_position(t: f64) -> EclipticCoords {
    let args = Arguments::at(t);

    let mut sum_longitude = 0.0;
    let mut sum_distance = 0.0;
    for &(d, m, mp, f, lon_coeff, dist_coeff) in LONGITUDE_DISTANCE_TERMS.iter() {
        let (angle, weight) = args.term(d, m, mp, f);
        sum_longitude += lon_coeff * weight * angle.sin();
        sum_distance += dist_coeff * weight * angle.cos();
    }

    let mut sum_latitude = 0.0;
    for &(d, m, mp, f, lat_coeff) in LATITUDE_TERMS.iter() {
        let (angle, weight) = args.term(d, m, mp, f);
        sum_latitude += lat_coeff * weight * angle.sin();
    }

    // Venus, Jupiter, and Earth-flattening corrections
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let l = args.mean_longitude.to_radians();
    let f = args.latitude_argument.to_radians();
    let mp = args.moon_anomaly.to_radians();

    sum_longitude += 3958.0 * a1.sin() + 1962.0 * (l - f).sin() + 318.0 * a2.sin();
    sum_latitude += -2235.0 * l.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l - mp).sin()
        - 115.0 * (l + mp).sin();

    EclipticCoords {
        longitude: normalize_degrees(args.mean_longitude + sum_longitude / 1_000_000.0),
        latitude: sum_latitude / 1_000_000.0,
        distance_km: MEAN_DISTANCE_KM + sum_distance / 1000.0,
    }
}

/// Apparent position: geometric position plus nutation in longitude.
pub fn apparent_position(t: f64, nutation: &Nutation) -> EclipticCoords {
    let geometric = geocentric_position(t);
    EclipticCoords {
        longitude: normalize_degrees(geometric.longitude + nutation.longitude),
        ..geometric
    }
}
