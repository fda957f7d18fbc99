//! Centralized constants for the wakearc engine.
//!
//! The interaction thresholds in this file were tuned against real gestures
//! rather than derived from first principles. Treat them as product values:
//! change them deliberately, not to make the math prettier.

// ============================================================================
// Waking Window Defaults
// ============================================================================

/// Default wake time when the store has no wake marker for a date (HH:MM:SS)
pub const DEFAULT_WAKE_TIME: &str = "07:00:00";

/// Default bed time when the store has no bed marker for a date (HH:MM:SS).
/// Together with the default wake time this yields the conservative
/// 14-hour fallback window.
pub const DEFAULT_BED_TIME: &str = "21:00:00";

/// Default angle where the arc begins, in degrees
pub const DEFAULT_ARC_START_ANGLE: f64 = 110.0;

/// Default angle where the arc ends, in degrees
pub const DEFAULT_ARC_END_ANGLE: f64 = 70.0;

/// Minutes-since-midnight value used in place of a literal midnight bedtime.
/// A bed time of exactly 00:00 means "end of day", not "start of day".
pub const MIDNIGHT_BEDTIME_MINUTES: i32 = 1439;

/// Minutes in a full day
pub const MINUTES_PER_DAY: i32 = 1440;

/// Substitute span for a degenerate zero-length waking window.
/// Keeps the normalized-time division defined instead of crashing.
pub const MINIMUM_WINDOW_MINUTES: i32 = 1;

// ============================================================================
// Interval Constraints
// ============================================================================

/// Minimum duration of a draggable interval entry, in minutes
pub const MINIMUM_INTERVAL_MINUTES: i32 = 15;

/// Maximum duration of a draggable interval entry, in minutes (12 hours)
pub const MAXIMUM_INTERVAL_MINUTES: i32 = 720;

/// How close a candidate end may sit past the bed boundary before the
/// validator force-snaps it, in minutes. Prevents jitter while dragging
/// near the end of the arc.
pub const NEAR_BED_TOLERANCE_MINUTES: i32 = 10;

// ============================================================================
// Drag Interaction
// ============================================================================

/// Angular distance within which a pointer grabs a start/end anchor, in degrees
pub const ANCHOR_PROXIMITY_DEGREES: f64 = 10.0;

/// How long the confirmation time label stays visible after release, in ms
pub const CONFIRMATION_DISPLAY_MS: i64 = 1000;

/// Additional delay after the confirmation label hides before the drag
/// session is cleared, in ms. Covers the fade-out animation window.
pub const CONFIRMATION_CLEAR_DELAY_MS: i64 = 300;

/// Upper bound on the per-entry anchor position cache
pub const ANCHOR_CACHE_CAPACITY: usize = 64;

// ============================================================================
// Render Order
// ============================================================================

/// Z-index assigned to the entry currently being dragged; beats every tier
pub const DRAGGED_Z_INDEX: f64 = 100.0;

/// Base tier for feed (point) entries
pub const FEED_TIER: f64 = 50.0;

/// Base tier for task interval entries
pub const TASK_TIER: f64 = 40.0;

/// Base tier for sleep intervals that are not currently running
pub const SLEEP_TIER: f64 = 30.0;

/// Base tier for a live-running sleep interval
pub const ONGOING_SLEEP_TIER: f64 = 70.0;

/// Base tier for a paused live sleep interval
pub const PAUSED_SLEEP_TIER: f64 = 65.0;

/// Fixed tier for the wake/bed markers; below draggable content,
/// above the base arc
pub const MARKER_Z_INDEX: f64 = 5.0;

/// Interval duration at which the shortness bonus bottoms out, in seconds
pub const DURATION_PENALTY_CAP_SECS: i64 = 7200;

/// Maximum z-index penalty applied to long intervals within a tier
pub const DURATION_PENALTY_MAX: f64 = 20.0;

// ============================================================================
// Engine Timing
// ============================================================================

/// Default interval between "now" resyncs of ongoing entries, in seconds
pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 60;

/// Minimum allowed resync interval (seconds)
pub const MINIMUM_RESYNC_INTERVAL_SECS: u64 = 10;

/// Maximum allowed resync interval (seconds)
pub const MAXIMUM_RESYNC_INTERVAL_SECS: u64 = 600;
