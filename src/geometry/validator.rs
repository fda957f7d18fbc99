//! Clamping of candidate intervals into the waking window.
//!
//! [`validate_range`] is a total function: it never fails and always returns
//! a legal interval. Candidates are reduced to minutes-since-wake positions,
//! clamped and duration-constrained there, then re-attached to their original
//! day components with a `+1 day` adjustment on whichever endpoint crossed
//! midnight relative to the window.

use chrono::{NaiveDate, NaiveDateTime};

use super::ArcBounds;
use crate::common::constants::{
    MAXIMUM_INTERVAL_MINUTES, MINIMUM_INTERVAL_MINUTES, MINUTES_PER_DAY,
    NEAR_BED_TOLERANCE_MINUTES,
};
use crate::common::utils::{minutes_of, ring_distance_minutes, time_from_minutes};

/// Clamp a candidate `(start, end)` pair into a legal interval.
///
/// Rules, in order:
/// 1. Start snaps into the waking window, to the closer boundary if outside.
/// 2. End snaps likewise, except an overshoot past bed of at most ten
///    minutes is left alone — force-snapping there makes the handle jitter
///    while dragging near the boundary.
/// 3. Minimum duration of fifteen minutes, pushing the end later or, when
///    the window leaves no room, pulling the start earlier.
/// 4. Maximum duration of twelve hours, capping the end.
///
/// # Arguments
/// * `start` - Candidate start instant
/// * `end` - Candidate end instant
/// * `bounds` - The waking window for the day being edited
///
/// # Returns
/// A `(start, end)` pair inside the window (modulo the near-bed tolerance),
/// with day components preserved across midnight wraps. Idempotent: feeding
/// the output back in returns it unchanged.
pub fn validate_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
    bounds: &ArcBounds,
) -> (NaiveDateTime, NaiveDateTime) {
    let total = bounds.total_waking_minutes();

    let mut start_pos = bounds.minutes_since_wake(start.time());
    let mut end_pos = end_position(end, bounds);

    // Minimum duration: push the end out, or pull the start back when the
    // bed boundary leaves no room
    if end_pos - start_pos < MINIMUM_INTERVAL_MINUTES {
        end_pos = start_pos + MINIMUM_INTERVAL_MINUTES;
        if end_pos > total {
            if total >= MINIMUM_INTERVAL_MINUTES {
                start_pos = total - MINIMUM_INTERVAL_MINUTES;
            }
            end_pos = total;
        }
    }

    // Maximum duration: cap the end
    if end_pos - start_pos > MAXIMUM_INTERVAL_MINUTES {
        end_pos = start_pos + MAXIMUM_INTERVAL_MINUTES;
    }

    let base = wake_day_of(start, bounds);
    (
        attach_date(start_pos, base, bounds),
        attach_date(end_pos, base, bounds),
    )
}

/// End position since wake, honoring the near-bed tolerance: an overshoot
/// of at most ten minutes past bed is kept rather than snapped.
fn end_position(end: NaiveDateTime, bounds: &ArcBounds) -> i32 {
    let total = bounds.total_waking_minutes();
    let offset = bounds.offset_from_wake(end.time());
    if offset <= total + NEAR_BED_TOLERANCE_MINUTES {
        offset
    } else {
        // Well outside the window: snap to the closer boundary
        let bed_position = (bounds.wake_minutes() + total).rem_euclid(MINUTES_PER_DAY);
        let to_wake = ring_distance_minutes(minutes_of(end.time()), bounds.wake_minutes());
        let to_bed = ring_distance_minutes(minutes_of(end.time()), bed_position);
        if to_bed <= to_wake { total } else { 0 }
    }
}

/// The calendar day the waking window opened on, derived from the candidate
/// start. For an overnight window, a start after midnight belongs to the
/// previous day's window.
pub(crate) fn wake_day_of(start: NaiveDateTime, bounds: &ArcBounds) -> NaiveDate {
    if bounds.crosses_midnight() && minutes_of(start.time()) < bounds.wake_minutes() {
        start.date() - chrono::Duration::days(1)
    } else {
        start.date()
    }
}

/// Re-attach a minutes-since-wake position to calendar time, adding a day
/// when the position lands past midnight.
pub(crate) fn attach_date(position: i32, wake_day: NaiveDate, bounds: &ArcBounds) -> NaiveDateTime {
    let absolute = bounds.wake_minutes() + position;
    let date = wake_day + chrono::Duration::days(i64::from(absolute / MINUTES_PER_DAY));
    date.and_time(time_from_minutes(absolute))
}
