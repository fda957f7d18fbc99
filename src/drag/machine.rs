//! The drag-interaction state machine.
//!
//! Orchestrates a single in-progress gesture: mode detection from anchor
//! proximity, live constrained recomputation through the mapper and
//! validator, and the post-release confirmation cycle. States move
//! `Idle → Dragging → Confirming → Idle`; there is no re-entrancy — a new
//! gesture while one is confirming simply replaces it, which is the
//! implicit cancel.
//!
//! The machine is the sole mutator of the session and the anchor cache.
//! Gesture callbacks never block; store updates on release are
//! fire-and-forget.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::session::{DragMode, DragSession, Feedback};
use crate::common::constants::{
    ANCHOR_CACHE_CAPACITY, ANCHOR_PROXIMITY_DEGREES, CONFIRMATION_CLEAR_DELAY_MS,
    CONFIRMATION_DISPLAY_MS, MINIMUM_INTERVAL_MINUTES,
};
use crate::common::utils::angular_distance;
use crate::geometry::mapper::{angle_for_time, time_for_angle};
use crate::geometry::validator::{attach_date, validate_range, wake_day_of};
use crate::geometry::ArcBounds;
use crate::schedule::{EntryId, ScheduleEntry, ScheduleStore};

/// Last-rendered anchor angles for an entry, kept across gestures so a
/// repeated drag derives its mode from true post-clamp geometry rather
/// than stale model data.
#[derive(Debug, Clone, Copy)]
struct CachedAnchors {
    start: f64,
    end: f64,
}

/// Machine state. `Confirming` keeps the frozen session alive for the
/// confirmation label until the timeout clears it.
enum DragState {
    Idle,
    Dragging(DragSession),
    Confirming {
        session: DragSession,
        released_at: NaiveDateTime,
    },
}

/// Callback invoked with the session after every live change or on release
pub type SessionCallback = Box<dyn Fn(&DragSession)>;

/// Callback invoked with feedback signals for the UI layer
pub type FeedbackCallback = Box<dyn Fn(Feedback)>;

/// State machine for one gesture at a time.
///
/// Owned by the engine and driven from its pointer callbacks plus a
/// periodic [`tick`](Self::tick). All methods are synchronous and O(1)
/// apart from the store lookups they are handed.
pub struct DragStateMachine {
    state: DragState,
    anchor_cache: HashMap<EntryId, CachedAnchors>,
    on_drag_changed: Option<SessionCallback>,
    on_drag_ended: Option<SessionCallback>,
    on_feedback: Option<FeedbackCallback>,
}

impl Default for DragStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DragStateMachine {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            anchor_cache: HashMap::new(),
            on_drag_changed: None,
            on_drag_ended: None,
            on_feedback: None,
        }
    }

    /// Subscribe to live session changes during a gesture
    pub fn set_on_drag_changed(&mut self, callback: impl Fn(&DragSession) + 'static) {
        self.on_drag_changed = Some(Box::new(callback));
    }

    /// Subscribe to gesture completion, after the store update is emitted
    pub fn set_on_drag_ended(&mut self, callback: impl Fn(&DragSession) + 'static) {
        self.on_drag_ended = Some(Box::new(callback));
    }

    /// Subscribe to abstract feedback signals (for haptics and the like)
    pub fn set_on_feedback(&mut self, callback: impl Fn(Feedback) + 'static) {
        self.on_feedback = Some(Box::new(callback));
    }

    /// Snapshot of the current session, live or confirming, for drawing
    /// the time labels.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) | DragState::Confirming { session, .. } => Some(session),
        }
    }

    /// Id of the entry currently tracked by a gesture or its confirmation
    pub fn dragged_entry_id(&self) -> Option<&str> {
        self.session().map(|s| s.target_id.as_str())
    }

    /// Begin a gesture on an entry.
    ///
    /// Rejected with no state change when editing is disallowed for the
    /// date, the entry is missing, or the entry is immutable (ongoing or a
    /// fixed marker). A rejected start leaves any confirming session
    /// untouched. An accepted start replaces whatever state was present —
    /// the implicit cancel of a pending confirmation.
    ///
    /// # Returns
    /// `true` if the gesture was accepted and a session opened
    pub fn begin_drag(
        &mut self,
        store: &dyn ScheduleStore,
        bounds: &ArcBounds,
        date: NaiveDate,
        id: &str,
        pointer_angle: f64,
    ) -> bool {
        if !store.is_editing_allowed(date) {
            log_debug!("Drag rejected: editing disallowed for {date}");
            self.emit_feedback(Feedback::Rejected);
            return false;
        }

        let Some(entry) = store.get_entry(id, date) else {
            self.emit_feedback(Feedback::Rejected);
            return false;
        };

        if !entry.is_draggable() {
            log_debug!("Drag rejected: {id} is ongoing or fixed");
            self.emit_feedback(Feedback::Rejected);
            return false;
        }

        let anchors = self.anchors_for(&entry, bounds);
        let mode = resolve_mode(&entry, anchors, pointer_angle);
        let session = DragSession::open(&entry, mode);

        log_block_start!("Drag began on {id} ({})", mode_name(mode));
        log_indented!("start {}", session.live_start.format("%H:%M"));
        if let Some(end) = session.live_end {
            log_indented!("end {}", end.format("%H:%M"));
        }

        self.state = DragState::Dragging(session);
        true
    }

    /// Apply a pointer move to the live session.
    ///
    /// The pointer angle converts to a time on the arc, the mode-specific
    /// constraint clamps it, and the anchors are recomputed from the
    /// resulting times — never from the raw pointer angle — so later
    /// proximity tests see true post-clamp geometry. No-op while idle or
    /// confirming.
    pub fn update_drag(&mut self, bounds: &ArcBounds, date: NaiveDate, pointer_angle: f64) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };

        let pointer = time_for_angle(pointer_angle, bounds, date);
        let constrained = apply_pointer(session, pointer, bounds);

        let anchors = CachedAnchors {
            start: angle_for_time(session.live_start.time(), bounds),
            end: angle_for_time(
                session.live_end.unwrap_or(session.live_start).time(),
                bounds,
            ),
        };
        let target_id = session.target_id.clone();
        let snapshot = session.clone();

        self.cache_anchors(target_id, anchors);
        if constrained {
            self.emit_feedback(Feedback::Constrained);
        }
        if let Some(callback) = &self.on_drag_changed {
            callback(&snapshot);
        }
    }

    /// Finish the gesture: run the final validation pass (whole-interval
    /// mode only — the endpoint modes are already fully constrained), emit
    /// the updated entry to the store, cache the final anchors, and enter
    /// the confirmation window.
    ///
    /// # Returns
    /// The updated entry as emitted to the store, or `None` if no gesture
    /// was in progress or the entry vanished mid-drag
    pub fn end_drag(
        &mut self,
        store: &mut dyn ScheduleStore,
        bounds: &ArcBounds,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Option<ScheduleEntry> {
        let DragState::Dragging(mut session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return None;
        };

        if let (DragMode::WholeInterval { .. }, Some(end)) = (session.mode, session.live_end) {
            let (start, end) = validate_range(session.live_start, end, bounds);
            session.live_start = start;
            session.live_end = Some(end);
        }

        let Some(mut entry) = store.get_entry(&session.target_id, date) else {
            // Deleted mid-drag; nothing to update
            return None;
        };
        entry.start = session.live_start;
        entry.end = session.live_end;
        store.update_entry(entry.clone(), date);

        let anchors = CachedAnchors {
            start: angle_for_time(session.live_start.time(), bounds),
            end: angle_for_time(
                session.live_end.unwrap_or(session.live_start).time(),
                bounds,
            ),
        };
        self.cache_anchors(session.target_id.clone(), anchors);

        log_block_start!(
            "Drag ended on {}: {} - {}",
            session.target_id,
            session.live_start.format("%H:%M"),
            session
                .live_end
                .map_or_else(|| "—".to_string(), |e| e.format("%H:%M").to_string())
        );

        session.confirming = true;
        let snapshot = session.clone();
        self.state = DragState::Confirming {
            session,
            released_at: now,
        };

        self.emit_feedback(Feedback::Confirmed);
        if let Some(callback) = &self.on_drag_ended {
            callback(&snapshot);
        }
        Some(entry)
    }

    /// Advance the confirmation timeout cycle.
    ///
    /// After the display window the confirmation label hides; after the
    /// further clear delay the session is dropped and the machine returns
    /// to idle. Idempotent and safe to call at any cadence: a gesture that
    /// restarted in the meantime replaced this state wholesale, so a stale
    /// timeout can never clear a newer session.
    pub fn tick(&mut self, now: NaiveDateTime) {
        let DragState::Confirming {
            session,
            released_at,
        } = &mut self.state
        else {
            return;
        };

        let elapsed_ms = (now - *released_at).num_milliseconds();
        if elapsed_ms >= CONFIRMATION_DISPLAY_MS + CONFIRMATION_CLEAR_DELAY_MS {
            log_debug!("Confirmation cleared for {}", session.target_id);
            self.state = DragState::Idle;
        } else if elapsed_ms >= CONFIRMATION_DISPLAY_MS {
            session.confirming = false;
        }
    }

    /// Drop all state held for a deleted entry: its cached anchors and,
    /// if it is the current gesture target, the session itself.
    pub fn forget_entry(&mut self, id: &str) {
        self.anchor_cache.remove(id);
        if self.dragged_entry_id() == Some(id) {
            self.state = DragState::Idle;
        }
    }

    /// Cached anchors if present, else anchors computed from the entry's
    /// stored times.
    fn anchors_for(&self, entry: &ScheduleEntry, bounds: &ArcBounds) -> CachedAnchors {
        if let Some(cached) = self.anchor_cache.get(&entry.id) {
            return *cached;
        }
        let start = angle_for_time(entry.start.time(), bounds);
        let end = entry
            .end
            .map_or(start, |e| angle_for_time(e.time(), bounds));
        CachedAnchors { start, end }
    }

    fn cache_anchors(&mut self, id: EntryId, anchors: CachedAnchors) {
        // The cache is advisory; dropping it only costs re-derived anchors
        if !self.anchor_cache.contains_key(&id) && self.anchor_cache.len() >= ANCHOR_CACHE_CAPACITY
        {
            self.anchor_cache.clear();
        }
        self.anchor_cache.insert(id, anchors);
    }

    fn emit_feedback(&self, feedback: Feedback) {
        if let Some(callback) = &self.on_feedback {
            callback(feedback);
        }
    }
}

/// Pick the edit mode from pointer proximity to the entry's anchors.
fn resolve_mode(entry: &ScheduleEntry, anchors: CachedAnchors, pointer_angle: f64) -> DragMode {
    if !entry.kind.is_interval() {
        // Point entries drag as a single angle
        return DragMode::WholeInterval { duration_minutes: 0 };
    }

    if angular_distance(pointer_angle, anchors.start) < ANCHOR_PROXIMITY_DEGREES {
        DragMode::StartPoint
    } else if angular_distance(pointer_angle, anchors.end) < ANCHOR_PROXIMITY_DEGREES {
        DragMode::EndPoint
    } else {
        let duration = entry
            .end
            .map_or(0, |end| (end - entry.start).num_minutes());
        DragMode::WholeInterval {
            duration_minutes: duration,
        }
    }
}

/// Apply the pointer instant to the session under its mode constraint.
/// Returns true when the move was clamped.
fn apply_pointer(session: &mut DragSession, pointer: NaiveDateTime, bounds: &ArcBounds) -> bool {
    let total = bounds.total_waking_minutes();
    let wake_day = wake_day_of(session.original_start, bounds);
    let pointer_pos = i64::from(bounds.minutes_since_wake(pointer.time()));

    match session.mode {
        DragMode::StartPoint => {
            let end = session.live_end.unwrap_or(session.live_start);
            let end_pos = i64::from(bounds.minutes_since_wake(end.time()));
            let latest = end_pos - i64::from(MINIMUM_INTERVAL_MINUTES);
            let new_start = pointer_pos.min(latest).max(0);
            session.live_start = attach_date(new_start as i32, wake_day, bounds);
            new_start != pointer_pos
        }
        DragMode::EndPoint => {
            let start_pos = i64::from(bounds.minutes_since_wake(session.live_start.time()));
            let earliest = start_pos + i64::from(MINIMUM_INTERVAL_MINUTES);
            let new_end = pointer_pos.max(earliest).min(i64::from(total));
            session.live_end = Some(attach_date(new_end as i32, wake_day, bounds));
            new_end != pointer_pos
        }
        DragMode::WholeInterval { duration_minutes } => {
            if session.live_end.is_none() {
                // Feed: the pointer is the new instant, already on the arc
                session.live_start = pointer;
                return false;
            }

            // The pointer is the new center; shift the pair back inside
            // the window without changing the duration
            let half = duration_minutes / 2;
            let mut start = pointer_pos - half;
            let mut end = start + duration_minutes;
            let mut clamped = false;
            if start < 0 {
                end -= start;
                start = 0;
                clamped = true;
            }
            if end > i64::from(total) {
                start -= end - i64::from(total);
                end = i64::from(total);
                clamped = true;
            }
            if start < 0 {
                // Interval longer than the window; pin to the window
                start = 0;
                clamped = true;
            }
            session.live_start = attach_date(start as i32, wake_day, bounds);
            session.live_end = Some(attach_date(end as i32, wake_day, bounds));
            clamped
        }
    }
}

fn mode_name(mode: DragMode) -> &'static str {
    match mode {
        DragMode::StartPoint => "start point",
        DragMode::EndPoint => "end point",
        DragMode::WholeInterval { .. } => "whole interval",
    }
}
