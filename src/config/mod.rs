//! Configuration for the wakearc engine.
//!
//! Provides TOML-based configuration (`wakearc.toml`) for the values a
//! deployment may reasonably tune: the fallback waking window, the arc's
//! angular placement, and the resync cadence. The interaction thresholds
//! (anchor snap distance, duration limits, confirmation timings) are *not*
//! configurable — they were tuned by feel against real gestures and live in
//! [`crate::common::constants`].
//!
//! ## Configuration Structure
//!
//! ```toml
//! wake = "07:00:00"        # Fallback wake time when a day has no marker
//! bed = "21:00:00"         # Fallback bed time when a day has no marker
//! arc_start_angle = 110.0  # Angle where the arc begins (degrees)
//! arc_end_angle = 70.0     # Angle where the arc ends (degrees)
//! resync_interval = 60     # Seconds between "now" resyncs (10-600)
//! ```
//!
//! A missing configuration file is not an error: every field falls back to
//! the defaults in `common::constants`, keeping the engine total even with
//! no configuration at all.

pub mod loading;
pub mod validation;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::common::constants::{
    DEFAULT_ARC_END_ANGLE, DEFAULT_ARC_START_ANGLE, DEFAULT_BED_TIME,
    DEFAULT_RESYNC_INTERVAL_SECS, DEFAULT_WAKE_TIME,
};
use crate::geometry::ArcBounds;

pub use loading::{load, load_from_path};
pub use validation::validate_config;

/// Engine configuration with optional fields; anything absent falls back
/// to the compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Fallback wake time (HH:MM:SS) for days without a wake marker
    pub wake: Option<String>,
    /// Fallback bed time (HH:MM:SS) for days without a bed marker
    pub bed: Option<String>,
    /// Angle where the arc begins, in degrees
    pub arc_start_angle: Option<f64>,
    /// Angle where the arc ends, in degrees
    pub arc_end_angle: Option<f64>,
    /// Seconds between "now" resyncs of ongoing entries
    pub resync_interval: Option<u64>,
}

impl EngineConfig {
    /// The fallback wake time. Malformed values degrade to the default
    /// rather than failing — validation warns about them at load time.
    pub fn wake_time(&self) -> NaiveTime {
        parse_time_or(self.wake.as_deref(), DEFAULT_WAKE_TIME)
    }

    /// The fallback bed time, with the same degradation rule.
    pub fn bed_time(&self) -> NaiveTime {
        parse_time_or(self.bed.as_deref(), DEFAULT_BED_TIME)
    }

    /// Arc bounds built entirely from configuration defaults, used when a
    /// day has no markers in the store.
    pub fn default_bounds(&self) -> ArcBounds {
        ArcBounds::new(
            self.arc_start_angle.unwrap_or(DEFAULT_ARC_START_ANGLE),
            self.arc_end_angle.unwrap_or(DEFAULT_ARC_END_ANGLE),
            self.wake_time(),
            self.bed_time(),
        )
    }

    /// Resync cadence in seconds
    pub fn resync_interval_secs(&self) -> u64 {
        self.resync_interval.unwrap_or(DEFAULT_RESYNC_INTERVAL_SECS)
    }
}

/// Parse an HH:MM:SS time, falling back to a known-good default string.
fn parse_time_or(value: Option<&str>, default: &str) -> NaiveTime {
    let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M:%S").ok();
    value
        .and_then(parse)
        .or_else(|| parse(default))
        .unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_yields_default_window() {
        let config = EngineConfig::default();
        let bounds = config.default_bounds();
        // The conservative 14-hour fallback window
        assert_eq!(bounds.total_waking_minutes(), 14 * 60);
        assert_eq!(bounds.start_angle, 110.0);
        assert_eq!(bounds.end_angle, 70.0);
        assert_eq!(config.resync_interval_secs(), 60);
    }

    #[test]
    fn test_malformed_time_degrades_to_default() {
        let config = EngineConfig {
            wake: Some("not a time".into()),
            ..Default::default()
        };
        assert_eq!(config.wake_time(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn test_configured_values_win() {
        let config = EngineConfig {
            wake: Some("06:30:00".into()),
            bed: Some("20:00:00".into()),
            arc_start_angle: Some(90.0),
            arc_end_angle: Some(450.0),
            resync_interval: Some(120),
        };
        let bounds = config.default_bounds();
        assert_eq!(bounds.wake, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert_eq!(bounds.bed, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(bounds.start_angle, 90.0);
        // Angles normalize into [0, 360)
        assert_eq!(bounds.end_angle, 90.0);
        assert_eq!(config.resync_interval_secs(), 120);
    }
}
