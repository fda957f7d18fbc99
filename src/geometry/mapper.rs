//! Bidirectional mapping between wall-clock time and angular position.
//!
//! Both directions are pure, allocation-free, and total: times outside the
//! waking window clamp to the nearer boundary, angles outside the sweep cap
//! at the bed end of the arc. The inverse truncates to whole minutes, so a
//! round trip is exact to within one minute of rounding error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::ArcBounds;
use crate::common::constants::MINUTES_PER_DAY;
use crate::common::utils::{normalize_degrees, time_from_minutes};

/// Map a time of day to its angle on the arc.
///
/// Times outside the waking window clamp to whichever boundary is angularly
/// closer before conversion, so the result always lies on the arc.
///
/// # Arguments
/// * `time` - Time of day to position
/// * `bounds` - The waking window and its angular span
///
/// # Returns
/// Angle in degrees, normalized into `[0, 360)`
pub fn angle_for_time(time: NaiveTime, bounds: &ArcBounds) -> f64 {
    let total = bounds.total_waking_minutes();
    let since_wake = bounds.minutes_since_wake(time);

    let normalized = (f64::from(since_wake) / f64::from(total)).clamp(0.0, 1.0);
    normalize_degrees(bounds.start_angle + normalized * bounds.sweep())
}

/// Map an angle on the arc back to a wall-clock instant.
///
/// The inverse of [`angle_for_time`]. Angles past the end of the sweep cap
/// at the bed boundary. Minutes since wake are integer-truncated. The result
/// lands on `reference_date`, or one day later when the computed hour is
/// numerically below the wake hour — meaning the window wrapped past
/// midnight before reaching this angle.
///
/// # Arguments
/// * `angle` - Pointer angle in degrees, any winding
/// * `bounds` - The waking window and its angular span
/// * `reference_date` - The day the arc is displaying
///
/// # Returns
/// The instant on the arc corresponding to `angle`
pub fn time_for_angle(angle: f64, bounds: &ArcBounds, reference_date: NaiveDate) -> NaiveDateTime {
    let sweep = bounds.sweep();
    let mut relative = normalize_degrees(angle - bounds.start_angle);
    if relative > sweep {
        relative = sweep;
    }

    let total = bounds.total_waking_minutes();
    let since_wake = ((relative / sweep) * f64::from(total)) as i32;

    let minute_of_day = (bounds.wake_minutes() + since_wake).rem_euclid(MINUTES_PER_DAY);
    let time = time_from_minutes(minute_of_day);

    let date = if time.hour() < bounds.wake.hour() {
        reference_date + chrono::Duration::days(1)
    } else {
        reference_date
    };
    date.and_time(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    // Scenario from the product tuning pass: 12h window on a 320° arc
    fn reference_bounds() -> ArcBounds {
        ArcBounds::new(110.0, 70.0, t(7, 0), t(19, 0))
    }

    #[test]
    fn test_angle_for_time_midpoint() {
        // 13:00 is halfway through 07:00-19:00 → 110 + 0.5 * 320 = 270
        let angle = angle_for_time(t(13, 0), &reference_bounds());
        assert!((angle - 270.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_angle_for_time_boundaries() {
        let bounds = reference_bounds();
        assert!((angle_for_time(t(7, 0), &bounds) - 110.0).abs() < f64::EPSILON);
        assert!((angle_for_time(t(19, 0), &bounds) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_for_time_clamps_outside_window() {
        let bounds = reference_bounds();
        // 22:00 is nearer bed than wake: clamps to the bed angle
        assert!((angle_for_time(t(22, 0), &bounds) - 70.0).abs() < 1e-9);
        // 03:00 is nearer wake: clamps to the start angle
        assert!((angle_for_time(t(3, 0), &bounds) - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_time_for_angle_midpoint() {
        let result = time_for_angle(270.0, &reference_bounds(), date());
        assert_eq!(result, date().and_time(t(13, 0)));
    }

    #[test]
    fn test_time_for_angle_caps_overshoot_at_bed() {
        // 90° is past the 320° sweep as seen from 110°: cap at bed
        let result = time_for_angle(90.0, &reference_bounds(), date());
        assert_eq!(result, date().and_time(t(19, 0)));
    }

    #[test]
    fn test_round_trip_within_one_minute() {
        let bounds = reference_bounds();
        for minute in (0..720).step_by(7) {
            let time = t(7, 0) + chrono::Duration::minutes(minute);
            let round = time_for_angle(angle_for_time(time, &bounds), &bounds, date());
            let drift = (round.time() - time).num_minutes().abs();
            assert!(drift <= 1, "{time} drifted to {round}");
        }
    }

    #[test]
    fn test_overnight_window_wraps_date() {
        // Wake 20:00, bed 06:00: angles past the midnight point land tomorrow
        let bounds = ArcBounds::new(0.0, 180.0, t(20, 0), t(6, 0));
        let near_end = time_for_angle(170.0, &bounds, date());
        assert_eq!(near_end.date(), date() + chrono::Duration::days(1));
        assert!(near_end.time() < t(6, 0));

        let before_midnight = time_for_angle(30.0, &bounds, date());
        assert_eq!(before_midnight.date(), date());
        assert!(before_midnight.time() >= t(20, 0));
    }

    #[test]
    fn test_midnight_bedtime_spans_full_evening() {
        // Bed at 00:00 reads as 23:59, not a zero-length window
        let bounds = ArcBounds::new(0.0, 360.0, t(6, 0), t(0, 0));
        let angle = angle_for_time(t(15, 0), &bounds);
        let expected = 360.0 * f64::from(9 * 60) / f64::from(1079);
        assert!((angle - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_window_does_not_divide_by_zero() {
        let bounds = ArcBounds::new(0.0, 360.0, t(8, 0), t(8, 0));
        let angle = angle_for_time(t(8, 0), &bounds);
        assert!(angle.is_finite());
        let time = time_for_angle(angle, &bounds, date());
        assert_eq!(time.time(), t(8, 0));
    }
}
