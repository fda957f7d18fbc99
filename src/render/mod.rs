//! Render-order resolution for simultaneously visible entries.
//!
//! The renderer asks for a fresh set of descriptors every frame; nothing in
//! this module is persisted. Stacking priority is deterministic: the dragged
//! entry beats everything, tiers separate entry kinds, and within a tier
//! shorter intervals render on top of longer ones so small things are not
//! hidden behind big ones. Ties fall back to the caller's stable input
//! order.

use chrono::NaiveDateTime;

use crate::common::constants::{
    DRAGGED_Z_INDEX, DURATION_PENALTY_CAP_SECS, DURATION_PENALTY_MAX, FEED_TIER, MARKER_Z_INDEX,
    ONGOING_SLEEP_TIER, PAUSED_SLEEP_TIER, SLEEP_TIER, TASK_TIER,
};
use crate::schedule::{EntryKind, ScheduleEntry};

/// Per-frame visual state for one entry.
///
/// Derived from a [`ScheduleEntry`], the current drag target, and "now";
/// recomputed every frame and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescriptor {
    /// Entry this descriptor was derived from
    pub entry_id: String,
    /// Kind of the underlying entry
    pub kind: EntryKind,
    /// True while this entry is the active drag target
    pub is_dragged: bool,
    /// Effective duration in seconds (zero for point entries)
    pub duration_secs: i64,
    /// True while the interval is live-running
    pub is_ongoing: bool,
    /// True while a live interval is paused
    pub is_paused: bool,
    /// Resolved stacking priority
    pub z_index: f64,
}

impl RenderDescriptor {
    /// Derive the descriptor for an entry at `now`.
    ///
    /// `dragged_id` is the id of the entry currently being dragged, if any.
    pub fn derive(entry: &ScheduleEntry, dragged_id: Option<&str>, now: NaiveDateTime) -> Self {
        let is_dragged = dragged_id == Some(entry.id.as_str());
        let duration_secs = entry.duration(now).num_seconds();
        let z_index = if entry.kind.is_marker() {
            // Fixed markers bypass tier resolution entirely
            MARKER_Z_INDEX
        } else {
            resolve_z_index(
                entry.kind,
                is_dragged,
                entry.is_ongoing,
                entry.is_paused,
                duration_secs,
            )
        };

        Self {
            entry_id: entry.id.clone(),
            kind: entry.kind,
            is_dragged,
            duration_secs,
            is_ongoing: entry.is_ongoing,
            is_paused: entry.is_paused,
            z_index,
        }
    }
}

/// Compute the stacking priority for a draggable entry.
///
/// Dragged entries return a constant maximum. Otherwise the base tier by
/// kind (feeds over tasks over finished sleeps, with ongoing sleeps on top)
/// is reduced by a duration penalty: the longer the interval, up to a
/// two-hour cap, the further down it sinks within its tier.
pub fn resolve_z_index(
    kind: EntryKind,
    is_dragged: bool,
    is_ongoing: bool,
    is_paused: bool,
    duration_secs: i64,
) -> f64 {
    if is_dragged {
        return DRAGGED_Z_INDEX;
    }

    let tier = match kind {
        EntryKind::Feed => FEED_TIER,
        EntryKind::Task => TASK_TIER,
        EntryKind::Sleep { .. } if is_ongoing && is_paused => PAUSED_SLEEP_TIER,
        EntryKind::Sleep { .. } if is_ongoing => ONGOING_SLEEP_TIER,
        EntryKind::Sleep { .. } => SLEEP_TIER,
        EntryKind::WakeMarker | EntryKind::BedMarker => MARKER_Z_INDEX,
    };

    if kind.is_interval() && duration_secs > 0 {
        let capped = duration_secs.min(DURATION_PENALTY_CAP_SECS);
        let penalty = capped as f64 / DURATION_PENALTY_CAP_SECS as f64 * DURATION_PENALTY_MAX;
        tier - penalty
    } else {
        tier
    }
}

/// Stable-sort descriptors bottom-to-top for drawing.
/// Equal priorities keep the caller's input order.
pub fn stack_for_drawing(descriptors: &mut [RenderDescriptor]) {
    descriptors.sort_by(|a, b| {
        a.z_index
            .partial_cmp(&b.z_index)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
