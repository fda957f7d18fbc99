//! In-memory schedule store for tests and harnesses.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{EntryKind, ScheduleEntry, ScheduleStore};

/// Simple day-keyed store backed by hash maps.
///
/// Entries keep insertion order per day so overlap detection sees the same
/// "first match in storage order" behavior a real store would provide.
#[derive(Default)]
pub struct MemoryStore {
    days: HashMap<NaiveDate, Vec<ScheduleEntry>>,
    locked_dates: Vec<NaiveDate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under a date, appending in storage order
    pub fn insert(&mut self, date: NaiveDate, entry: ScheduleEntry) {
        self.days.entry(date).or_default().push(entry);
    }

    /// Mark a date read-only; gesture starts on it will be rejected
    pub fn lock_date(&mut self, date: NaiveDate) {
        self.locked_dates.push(date);
    }

    /// Number of entries stored for a date
    pub fn entry_count(&self, date: NaiveDate) -> usize {
        self.days.get(&date).map_or(0, Vec::len)
    }

    /// All entries for a date, in storage order
    pub fn entries(&self, date: NaiveDate) -> Vec<ScheduleEntry> {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    fn find_kind(&self, date: NaiveDate, kind: EntryKind) -> Option<ScheduleEntry> {
        self.days
            .get(&date)?
            .iter()
            .find(|e| e.kind == kind)
            .cloned()
    }
}

impl ScheduleStore for MemoryStore {
    fn get_entry(&self, id: &str, date: NaiveDate) -> Option<ScheduleEntry> {
        self.days.get(&date)?.iter().find(|e| e.id == id).cloned()
    }

    fn update_entry(&mut self, entry: ScheduleEntry, date: NaiveDate) {
        let entries = self.days.entry(date).or_default();
        if let Some(slot) = entries.iter_mut().find(|e| e.id == entry.id) {
            *slot = entry;
        } else {
            entries.push(entry);
        }
    }

    fn find_wake_marker(&self, date: NaiveDate) -> Option<ScheduleEntry> {
        self.find_kind(date, EntryKind::WakeMarker)
    }

    fn find_bed_marker(&self, date: NaiveDate) -> Option<ScheduleEntry> {
        self.find_kind(date, EntryKind::BedMarker)
    }

    fn list_naps(&self, date: NaiveDate) -> Vec<ScheduleEntry> {
        self.days
            .get(&date)
            .map(|entries| entries.iter().filter(|e| e.is_nap()).cloned().collect())
            .unwrap_or_default()
    }

    fn is_editing_allowed(&self, date: NaiveDate) -> bool {
        !self.locked_dates.contains(&date)
    }
}
