use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A transaction deadline, in milliseconds since the network's nemesis epoch.
///
/// Unconfirmed transactions expire once their deadline passes. The network
/// measures time from its own epoch, so converting from wall-clock time needs
/// the network's `epoch_adjustment` (seconds since the Unix epoch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(u64);

/// The default validity window for new transactions.
const DEFAULT_HORIZON_HOURS: i64 = 2;

impl Deadline {
    /// Creates a deadline two hours from now, expressed against the given
    /// epoch adjustment.
    pub fn create(epoch_adjustment_secs: u64) -> Self {
        Self::create_with_horizon(epoch_adjustment_secs, Duration::hours(DEFAULT_HORIZON_HOURS))
    }

    /// Creates a deadline `horizon` from now.
    pub fn create_with_horizon(epoch_adjustment_secs: u64, horizon: Duration) -> Self {
        let now_millis = Utc::now().timestamp_millis();
        let epoch_millis = epoch_adjustment_secs as i64 * 1000;
        let value = now_millis.saturating_sub(epoch_millis) + horizon.num_milliseconds();
        Self(value.max(0) as u64)
    }

    /// The raw network timestamp carried on the wire.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Deadline {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
