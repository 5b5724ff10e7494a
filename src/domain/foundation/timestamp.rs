//! UTC instants for enrollment deadlines and enrollment bookkeeping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_comparisons_work() {
        let ts1 = Timestamp::now();
        let ts2 = ts1.plus_minutes(1);

        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn duration_since_is_signed() {
        let ts1 = Timestamp::now();
        let ts2 = ts1.plus_hours(3);

        assert_eq!(ts2.duration_since(&ts1).num_hours(), 3);
        assert_eq!(ts1.duration_since(&ts2).num_hours(), -3);
    }

    #[test]
    fn plus_and_minus_days_are_inverse() {
        let ts = Timestamp::now();
        assert_eq!(ts.plus_days(5).minus_days(5), ts);
    }

    #[test]
    fn deadline_parses_from_backend_iso_string() {
        let deadline: Timestamp = serde_json::from_str("\"2025-09-01T23:59:59Z\"").unwrap();

        assert_eq!(deadline.as_datetime().year(), 2025);
        assert_eq!(deadline.as_datetime().month(), 9);
        assert!(deadline.plus_minutes(1).is_after(&deadline));
    }

    #[test]
    fn equal_instants_are_neither_before_nor_after() {
        let ts = Timestamp::now();
        assert!(!ts.is_after(&ts));
        assert!(!ts.is_before(&ts));
    }
}
