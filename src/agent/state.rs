//! Previous readings kept between plugin invocations.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Readings older than this many seconds are not used for rates.
pub const MAX_DIFF_INTERVAL_SECS: i64 = 600;

/// Values and time of the previous invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    /// Unix time of the previous reading
    #[serde(rename = "_lastTime", default)]
    pub last_time: i64,
    /// Values keyed by `graph.metric`
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl StoredState {
    /// Load the state file. A missing or unreadable file yields an empty state.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                warn!("Cannot read state file {}: {}", path.display(), err);
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!("Ignoring corrupt state file {}: {}", path.display(), err);
            Self::default()
        })
    }

    /// Write the state file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Per-minute rate of `key` given its current value.
    pub fn rate(&self, key: &str, current: f64, now: i64) -> RateOutcome {
        let Some(&last) = self.values.get(key) else {
            return RateOutcome::NoPrevious;
        };
        per_minute_rate(current, last, now - self.last_time)
    }
}

/// Result of turning two readings into a rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateOutcome {
    Rate(f64),
    /// First reading for this metric
    NoPrevious,
    /// No time passed, or time went backwards
    NoElapsed,
    /// The previous reading is too old
    Stale,
    /// The counter went down, e.g. after a device reboot
    CounterReset,
}

/// Rate of change per minute between two readings `elapsed_secs` apart.
pub fn per_minute_rate(current: f64, last: f64, elapsed_secs: i64) -> RateOutcome {
    if elapsed_secs <= 0 {
        return RateOutcome::NoElapsed;
    }
    if elapsed_secs > MAX_DIFF_INTERVAL_SECS {
        return RateOutcome::Stale;
    }
    if current < last {
        return RateOutcome::CounterReset;
    }
    RateOutcome::Rate((current - last) * 60.0 / elapsed_secs as f64)
}
