//! Provider-neutral event types.
//!
//! Providers convert their API responses into these types, and the sync
//! engine works exclusively with them for matching, drift detection and
//! writes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event (provider-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Provider-assigned id. Empty until the event has been created.
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub color_id: Option<String>,
    pub reminders: Reminders,
    /// Last modification timestamp reported by the provider
    pub updated: Option<DateTime<Utc>>,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Flat ISO-8601 rendering for display: date for all-day events,
    /// RFC 3339 for timed ones.
    pub fn to_iso_string(&self) -> String {
        match self {
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
            EventTime::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

/// Reminder configuration of an event.
///
/// The two states are distinct on the wire: `Default` asks the provider to
/// apply the calendar's default reminders, `Custom` disables them and
/// installs the given overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "overrides", rename_all = "snake_case")]
pub enum Reminders {
    Default,
    Custom(Vec<Reminder>),
}

impl Reminders {
    pub fn popup(minutes: i64) -> Self {
        Reminders::Custom(vec![Reminder { minutes }])
    }

    /// Minutes of the first override, if custom reminders are in use.
    pub fn override_minutes(&self) -> Option<i64> {
        match self {
            Reminders::Default => None,
            Reminders::Custom(list) => list.first().map(|r| r.minutes),
        }
    }
}

/// A popup reminder/alarm for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the event start to trigger
    pub minutes: i64,
}
