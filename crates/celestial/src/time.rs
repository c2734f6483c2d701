//! Time scales for the ephemeris.
//!
//! Telemetry carries Unix seconds (UTC). The solar and lunar theories want
//! Julian centuries of Terrestrial Time from J2000.0, while sidereal time
//! wants Universal Time, so both are derived here.

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days between the Unix epoch and J2000.0 (2000-01-01 12:00 TT).
pub const UNIX_TO_J2000_DAYS: f64 = 10_957.5;

/// Julian date of J2000.0.
pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Days since J2000.0 for a Unix timestamp.
pub fn days_since_j2000(unix_seconds: i64) -> f64 {
    unix_seconds as f64 / SECONDS_PER_DAY - UNIX_TO_J2000_DAYS
}

/// Approximate TT − UT in seconds.
///
/// Uses the Espenak–Meeus polynomial for 2005–2050 and the long-term
/// parabola elsewhere. Good to a few seconds, far below what an OSD icon
/// can show.
pub fn delta_t_seconds(days_ut: f64) -> f64 {
    let year = 2000.0 + days_ut / 365.25;
    if (2005.0..=2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Julian centuries of UT since J2000.0.
pub fn centuries_ut(days_ut: f64) -> f64 {
    days_ut / DAYS_PER_CENTURY
}

/// Julian centuries of TT since J2000.0.
pub fn centuries_tt(days_ut: f64) -> f64 {
    (days_ut + delta_t_seconds(days_ut) / SECONDS_PER_DAY) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees, not normalized.
pub fn greenwich_mean_sidereal_degrees(days_ut: f64) -> f64 {
    let t = centuries_ut(days_ut);
    280.460_618_37 + 360.985_647_366_29 * days_ut + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0
}
