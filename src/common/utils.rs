//! Small shared helpers for angular and minute arithmetic.
//!
//! Everything in this module is pure and allocation-free; the geometry code
//! calls these from gesture callbacks, which must never block.

use chrono::{NaiveTime, Timelike};

use crate::common::constants::MINUTES_PER_DAY;

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Handles arbitrarily negative inputs, not just a single wrap.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Shortest angular distance between two angles, in degrees (0..=180).
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Minutes since midnight for a time of day. Seconds are truncated.
pub fn minutes_of(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

/// Shortest distance between two minute-of-day values around the 24h ring.
pub fn ring_distance_minutes(a: i32, b: i32) -> i32 {
    let diff = (a - b).rem_euclid(MINUTES_PER_DAY);
    diff.min(MINUTES_PER_DAY - diff)
}

/// Build a `NaiveTime` from a minutes-since-midnight value.
/// Values outside a single day wrap around.
pub fn time_from_minutes(minutes: i32) -> NaiveTime {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    // Wrapped value is always a valid hour/minute pair
    NaiveTime::from_hms_opt((wrapped / 60) as u32, (wrapped % 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}
