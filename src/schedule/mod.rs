//! Schedule entry data model.
//!
//! Entries are owned by the external store; the engine reads them and
//! proposes updates on gesture release. Everything here is plain data with
//! a few derived helpers — no behavior that touches the store.

pub mod store;

#[cfg(any(test, feature = "testing-support"))]
pub mod memory;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use store::ScheduleStore;

/// Identifier for a schedule entry, assigned by the external store
pub type EntryId = String;

/// Which kind of sleep an interval represents.
/// Only naps participate in overlap detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepType {
    /// Daytime nap inside the waking window
    Nap,
    /// The main overnight sleep
    Night,
}

/// The kind of a schedule entry.
///
/// Feeds are point entries with no end time. Tasks and sleeps are intervals.
/// The wake/bed markers are fixed point entries that bound the arc and are
/// never draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Feeding event — a single instant on the arc
    Feed,
    /// To-do style interval
    Task,
    /// Sleep interval, nap or overnight
    Sleep {
        /// Nap vs. overnight sleep
        sleep_type: SleepType,
    },
    /// Fixed marker for the start of the waking window
    WakeMarker,
    /// Fixed marker for the end of the waking window
    BedMarker,
}

impl EntryKind {
    /// Returns true for kinds that carry an end time.
    pub fn is_interval(&self) -> bool {
        matches!(self, Self::Task | Self::Sleep { .. })
    }

    /// Returns true for the fixed wake/bed markers.
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::WakeMarker | Self::BedMarker)
    }
}

/// A scheduled entry on the waking arc.
///
/// `end` is `None` for point entries (feeds, markers). For interval entries
/// `end >= start` under normal operation; an *ongoing* interval has its true
/// end at "now" (or at `paused_at` while paused) regardless of the stored
/// `end` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Store-assigned identifier
    pub id: EntryId,
    /// Entry kind; decides point vs. interval semantics and render tier
    pub kind: EntryKind,
    /// Start instant (local, naive)
    pub start: NaiveDateTime,
    /// End instant for interval entries
    pub end: Option<NaiveDateTime>,
    /// True while the interval is live-running
    pub is_ongoing: bool,
    /// True while a live interval is paused
    pub is_paused: bool,
    /// Instant the pause began, when paused
    pub paused_at: Option<NaiveDateTime>,
}

impl ScheduleEntry {
    /// Create a point entry (feed or marker) at an instant
    pub fn point(id: impl Into<EntryId>, kind: EntryKind, start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            kind,
            start,
            end: None,
            is_ongoing: false,
            is_paused: false,
            paused_at: None,
        }
    }

    /// Create a completed interval entry
    pub fn interval(
        id: impl Into<EntryId>,
        kind: EntryKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            start,
            end: Some(end),
            is_ongoing: false,
            is_paused: false,
            paused_at: None,
        }
    }

    /// The effective end of this entry at `now`.
    ///
    /// Ongoing intervals end at "now", or at the pause instant while paused.
    /// Point entries report their start so duration comes out zero.
    pub fn effective_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        if self.is_ongoing {
            if self.is_paused {
                self.paused_at.unwrap_or(now)
            } else {
                now
            }
        } else {
            self.end.unwrap_or(self.start)
        }
    }

    /// Duration of this entry at `now`. Zero for point entries and clamped
    /// to zero if the stored end precedes the start.
    pub fn duration(&self, now: NaiveDateTime) -> Duration {
        let span = self.effective_end(now) - self.start;
        span.max(Duration::zero())
    }

    /// Whether this entry may be dragged at all.
    /// Ongoing intervals and the fixed markers are immutable to gestures.
    pub fn is_draggable(&self) -> bool {
        !self.is_ongoing && !self.kind.is_marker()
    }

    /// Returns true for nap sleep intervals.
    pub fn is_nap(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::Sleep {
                sleep_type: SleepType::Nap
            }
        )
    }
}
