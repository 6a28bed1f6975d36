//! # Daylight Curve
//!
//! Half-sine irradiance shape shared by the hourly profile, the sensor sampler
//! and the live simulation.

use std::f64::consts::PI;

/// First hour with solar output.
pub const SUNRISE_HOUR: u32 = 6;
/// Last hour with solar output.
pub const SUNSET_HOUR: u32 = 18;

const DAYLIGHT_SPAN_HOURS: f64 = (SUNSET_HOUR - SUNRISE_HOUR) as f64;

pub fn is_daylight(hour: u32) -> bool {
    (SUNRISE_HOUR..=SUNSET_HOUR).contains(&hour)
}

/// Fraction of peak output at `hour`, following `sin((h - 6) / 12 * π)`.
///
/// Zero outside 06:00-18:00. The sine argument spans [0, π] inside that window,
/// so the curve is non-negative; the final clamp only absorbs the rounding
/// residue of `sin(π)`.
pub fn daylight_fraction(hour: u32) -> f64 {
    if !is_daylight(hour) {
        return 0.0;
    }
    let angle = (hour - SUNRISE_HOUR) as f64 / DAYLIGHT_SPAN_HOURS * PI;
    angle.sin().max(0.0)
}
