//! Timestamp type used throughout the service.
//!
//! Timestamps are UTC instants serialized as RFC 3339 (ISO-8601) text, the
//! format the challenge text embeds and the stores persist.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Get the current system time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 string, normalizing to UTC.
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// RFC 3339 with millisecond precision and a `Z` suffix — the exact
    /// rendering embedded in challenge text, so it must stay stable.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// This timestamp plus a number of seconds, clamped to a century so
    /// arithmetic can never overflow the representable range.
    pub fn plus_secs(&self, secs: u64) -> Self {
        const MAX_OFFSET_SECS: u64 = 100 * 365 * 24 * 60 * 60;
        let delta = Duration::seconds(secs.min(MAX_OFFSET_SECS) as i64);
        Self(self.0.checked_add_signed(delta).unwrap_or(self.0))
    }

    /// Whether this instant is strictly before `now` (used as an expiry
    /// check: `expires_at.is_past(now)`).
    pub fn is_past(&self, now: Timestamp) -> bool {
        self.0 < now.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
