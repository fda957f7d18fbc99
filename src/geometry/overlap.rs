//! Collision detection between a candidate sleep interval and existing naps.
//!
//! Used to gate save actions for newly created naps. The detector surfaces
//! its result as data — the colliding entry or `None` — and never fails;
//! the entry-creation flow owns blocking the save and presenting the
//! conflict.

use chrono::NaiveDateTime;

use crate::schedule::ScheduleEntry;

/// Find the first existing nap that collides with a candidate interval.
///
/// Uses the half-open overlap test `start1 < end2 && start2 < end1`, so
/// back-to-back naps (one ending exactly when the next starts) do not
/// conflict. Only nap entries on the candidate's calendar day participate.
/// An ongoing nap's effective end is "now" (or its pause instant), not its
/// stored end.
///
/// # Arguments
/// * `start` - Candidate interval start
/// * `end` - Candidate interval end
/// * `naps` - Existing nap entries for the day, in storage order
/// * `now` - Current instant, for ongoing naps
///
/// # Returns
/// The first overlapping nap in storage order, or `None`
pub fn find_overlapping_nap<'a>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    naps: &'a [ScheduleEntry],
    now: NaiveDateTime,
) -> Option<&'a ScheduleEntry> {
    naps.iter().find(|nap| {
        nap.is_nap()
            && nap.start.date() == start.date()
            && start < nap.effective_end(now)
            && nap.start < end
    })
}
