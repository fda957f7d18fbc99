//! Arc geometry: the waking window and its angular span.
//!
//! The arc represents the time between wake and bed as an angular sweep.
//! Bed may be numerically "before" wake, meaning the window crosses
//! midnight; a bed time of exactly 00:00 is a distinguished edge case
//! treated as 23:59 for span purposes. All window math runs in integer
//! minutes-since-midnight with explicit midnight-crossing branches.

pub mod mapper;
pub mod overlap;
pub mod validator;

use chrono::NaiveTime;

use crate::common::constants::{
    MIDNIGHT_BEDTIME_MINUTES, MINIMUM_WINDOW_MINUTES, MINUTES_PER_DAY,
};
use crate::common::utils::{minutes_of, normalize_degrees, ring_distance_minutes};

/// The waking window and its position on the arc.
///
/// Invariant: the angular sweep `(end_angle - start_angle + 360) mod 360`
/// is in `(0, 360]` — a zero result is read as a full circle rather than an
/// empty arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBounds {
    /// Angle where the arc begins, degrees in `[0, 360)`
    pub start_angle: f64,
    /// Angle where the arc ends, degrees in `[0, 360)`
    pub end_angle: f64,
    /// Time of day the waking window opens
    pub wake: NaiveTime,
    /// Time of day the waking window closes; 00:00 means end of day
    pub bed: NaiveTime,
}

impl ArcBounds {
    /// Create bounds with angles normalized into `[0, 360)`
    pub fn new(start_angle: f64, end_angle: f64, wake: NaiveTime, bed: NaiveTime) -> Self {
        Self {
            start_angle: normalize_degrees(start_angle),
            end_angle: normalize_degrees(end_angle),
            wake,
            bed,
        }
    }

    /// Angular sweep of the arc in degrees, in `(0, 360]`
    pub fn sweep(&self) -> f64 {
        let sweep = normalize_degrees(self.end_angle - self.start_angle);
        if sweep == 0.0 { 360.0 } else { sweep }
    }

    /// Wake time as minutes since midnight
    pub fn wake_minutes(&self) -> i32 {
        minutes_of(self.wake)
    }

    /// True when bed time is exactly midnight (00:00 stored for 24:00)
    pub fn is_midnight_bedtime(&self) -> bool {
        minutes_of(self.bed) == 0
    }

    /// Bed boundary in minutes since midnight, with the midnight edge case
    /// shifted to 23:59 so the span stays nearly a full day instead of zero
    pub fn effective_bed_minutes(&self) -> i32 {
        if self.is_midnight_bedtime() {
            MIDNIGHT_BEDTIME_MINUTES
        } else {
            minutes_of(self.bed)
        }
    }

    /// True when the waking window wraps past midnight
    pub fn crosses_midnight(&self) -> bool {
        self.effective_bed_minutes() < self.wake_minutes()
    }

    /// Length of the waking window in minutes.
    ///
    /// A degenerate zero-length window is widened to one minute so the
    /// normalized-time division stays defined.
    pub fn total_waking_minutes(&self) -> i32 {
        let wake = self.wake_minutes();
        let bed = self.effective_bed_minutes();
        let total = if bed >= wake {
            bed - wake
        } else {
            (MINUTES_PER_DAY - wake) + bed
        };
        total.max(MINIMUM_WINDOW_MINUTES)
    }

    /// Raw offset of a time of day from wake, in `[0, 1440)` around the ring
    pub fn offset_from_wake(&self, time: NaiveTime) -> i32 {
        (minutes_of(time) - self.wake_minutes()).rem_euclid(MINUTES_PER_DAY)
    }

    /// Minutes since wake for a time, clamped into the waking window.
    ///
    /// Times outside the window snap to whichever boundary is angularly
    /// closer: 0 for wake, `total_waking_minutes()` for bed.
    pub fn minutes_since_wake(&self, time: NaiveTime) -> i32 {
        let total = self.total_waking_minutes();
        let offset = self.offset_from_wake(time);
        if offset <= total {
            return offset;
        }

        let bed_position = (self.wake_minutes() + total).rem_euclid(MINUTES_PER_DAY);
        let to_wake = ring_distance_minutes(minutes_of(time), self.wake_minutes());
        let to_bed = ring_distance_minutes(minutes_of(time), bed_position);
        if to_bed <= to_wake { total } else { 0 }
    }
}
