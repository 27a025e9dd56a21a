//! Time window scanned for mirrored events.

use chrono::{DateTime, Duration, Utc};

use crate::constants::{DEFAULT_FUTURE_DAYS, DEFAULT_PAST_DAYS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for DateRange {
    /// Default range: DEFAULT_PAST_DAYS back, DEFAULT_FUTURE_DAYS ahead
    fn default() -> Self {
        DateRange::around(Utc::now(), DEFAULT_PAST_DAYS, DEFAULT_FUTURE_DAYS)
    }
}

impl DateRange {
    pub fn around(now: DateTime<Utc>, past_days: i64, future_days: i64) -> Self {
        DateRange {
            from: now - Duration::days(past_days),
            to: now + Duration::days(future_days),
        }
    }

    /// Half-open: `from <= instant < to`, matching how the window is listed.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_around() {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap();
        let range = DateRange::around(now, 30, 365);

        assert_eq!(range.from, Utc.with_ymd_and_hms(2025, 10, 2, 12, 0, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap());
        assert_eq!(range.from_rfc3339(), "2025-10-02T12:00:00+00:00");
    }

    #[test]
    fn test_contains_is_half_open() {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap();
        let range = DateRange::around(now, 30, 365);

        assert!(range.contains(now));
        assert!(range.contains(range.from));
        assert!(!range.contains(range.to));
        assert!(!range.contains(now - Duration::days(60)));
    }
}
