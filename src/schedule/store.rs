//! External store interface.
//!
//! Persistence, undo, and day-to-day navigation live outside the engine.
//! The engine only reads entries and proposes updates through this trait;
//! `update_entry` is fire-and-forget from the engine's perspective — the
//! gesture path never blocks on persistence.

use chrono::NaiveDate;

use super::ScheduleEntry;

/// Collaborator interface to the schedule store.
///
/// Implementations are expected to be cheap to query: the engine calls
/// `find_wake_marker`/`find_bed_marker` when resolving arc bounds and
/// `list_naps` on every overlap check.
pub trait ScheduleStore {
    /// Look up an entry by id for a given day
    fn get_entry(&self, id: &str, date: NaiveDate) -> Option<ScheduleEntry>;

    /// Propose an updated entry for a given day.
    /// The store owns conflict resolution and persistence.
    fn update_entry(&mut self, entry: ScheduleEntry, date: NaiveDate);

    /// The wake marker bounding the start of the day's arc, if any
    fn find_wake_marker(&self, date: NaiveDate) -> Option<ScheduleEntry>;

    /// The bed marker bounding the end of the day's arc, if any
    fn find_bed_marker(&self, date: NaiveDate) -> Option<ScheduleEntry>;

    /// All nap entries for a day, in storage order
    fn list_naps(&self, date: NaiveDate) -> Vec<ScheduleEntry>;

    /// Whether edit gestures are allowed for this date.
    /// A `false` result rejects gesture starts with no state change,
    /// identically to dragging an ongoing entry.
    fn is_editing_allowed(&self, date: NaiveDate) -> bool;
}
