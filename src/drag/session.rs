//! Drag session data.
//!
//! One [`DragSession`] exists per gesture, created on gesture start and
//! destroyed after the confirmation window. It replaces the pile of ambient
//! view flags the gesture would otherwise need: the mode is a sum type, the
//! live and original times travel together, and pure functions receive the
//! session by reference.

use chrono::NaiveDateTime;

use crate::schedule::{EntryId, ScheduleEntry};

/// How the gesture edits the target interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Move the start anchor; the end stays put
    StartPoint,
    /// Move the end anchor; the start stays put
    EndPoint,
    /// Move the whole interval, preserving the duration captured at
    /// gesture start. Point entries always drag in this mode with a
    /// zero duration.
    WholeInterval {
        /// Duration at gesture start, in minutes
        duration_minutes: i64,
    },
}

/// Abstract feedback signal for the UI layer.
///
/// The engine never calls a haptics API; collaborators map these to
/// whatever feedback channel they own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// The gesture ran into a constraint and was clamped
    Constrained,
    /// The gesture completed and the result was emitted to the store
    Confirmed,
    /// A gesture start was rejected (ongoing entry or editing disallowed)
    Rejected,
}

/// Transient state of one in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Entry being dragged
    pub target_id: EntryId,
    /// Edit mode resolved from anchor proximity at gesture start
    pub mode: DragMode,
    /// Current start under the gesture
    pub live_start: NaiveDateTime,
    /// Current end under the gesture; `None` for point entries
    pub live_end: Option<NaiveDateTime>,
    /// Start when the gesture began, for collaborators that show deltas
    pub original_start: NaiveDateTime,
    /// End when the gesture began
    pub original_end: Option<NaiveDateTime>,
    /// True while the post-release confirmation label is displayed
    pub confirming: bool,
}

impl DragSession {
    /// Open a session on an entry with the resolved mode.
    /// Live times start at the entry's current times.
    pub(crate) fn open(entry: &ScheduleEntry, mode: DragMode) -> Self {
        Self {
            target_id: entry.id.clone(),
            mode,
            live_start: entry.start,
            live_end: entry.end,
            original_start: entry.start,
            original_end: entry.end,
            confirming: false,
        }
    }
}
