//! Configuration validation.
//!
//! Catches impossible configurations at load time. Degradable problems
//! (malformed times) warn and fall back; structurally wrong values
//! (out-of-range intervals, non-finite angles) fail the load.

use anyhow::Result;
use chrono::NaiveTime;

use super::EngineConfig;
use crate::common::constants::{MAXIMUM_RESYNC_INTERVAL_SECS, MINIMUM_RESYNC_INTERVAL_SECS};

/// Validate a loaded configuration.
pub fn validate_config(config: &EngineConfig) -> Result<()> {
    if let Some(angle) = config.arc_start_angle
        && !angle.is_finite()
    {
        anyhow::bail!("arc_start_angle must be a finite angle in degrees (got {angle})");
    }

    if let Some(angle) = config.arc_end_angle
        && !angle.is_finite()
    {
        anyhow::bail!("arc_end_angle must be a finite angle in degrees (got {angle})");
    }

    if let Some(interval) = config.resync_interval
        && !(MINIMUM_RESYNC_INTERVAL_SECS..=MAXIMUM_RESYNC_INTERVAL_SECS).contains(&interval)
    {
        anyhow::bail!(
            "resync_interval ({} s) must be between {} and {} seconds",
            interval,
            MINIMUM_RESYNC_INTERVAL_SECS,
            MAXIMUM_RESYNC_INTERVAL_SECS
        );
    }

    warn_if_unparseable(config.wake.as_deref(), "wake");
    warn_if_unparseable(config.bed.as_deref(), "bed");

    Ok(())
}

/// Malformed times are not fatal — the engine falls back to its default
/// window — but the user should hear about them once, at load time.
fn warn_if_unparseable(value: Option<&str>, field: &str) {
    if let Some(s) = value
        && NaiveTime::parse_from_str(s, "%H:%M:%S").is_err()
    {
        log_pipe!();
        log_warning!("{field} (\"{s}\") is not a valid HH:MM:SS time; using the default");
    }
}
