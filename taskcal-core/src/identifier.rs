//! Correlation between tasks and calendar events.
//!
//! Calendar events have no field we can key on, so each mirrored event
//! carries the task uuid as a line in its description:
//!
//! ```text
//! Identifier: 5b3c1f0e-8a51-4c65-9a57-1f25d2a7e001
//! ```
//!
//! Only the first occurrence of the prefix counts. Events without a
//! parseable line are foreign and are never touched.

use crate::event::Event;

pub const IDENTIFIER_PREFIX: &str = "Identifier: ";

/// Ownership of a calendar event as seen by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// Created by us for the task with this uuid
    Managed(String),
    /// Foreign event
    Unmanaged,
}

/// Extracts the correlation key from a stored event.
pub trait Correlator: Send + Sync {
    fn correlate(&self, event: &Event) -> Correlation;
}

/// Reads the `Identifier:` line out of the free-text description.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionIdentifier;

impl Correlator for DescriptionIdentifier {
    fn correlate(&self, event: &Event) -> Correlation {
        match event.description.as_deref().and_then(extract_identifier) {
            Some(id) => Correlation::Managed(id.to_string()),
            None => Correlation::Unmanaged,
        }
    }
}

/// Render the identifier line for a task uuid.
pub fn embed_identifier(uuid: &str) -> String {
    format!("{IDENTIFIER_PREFIX}{uuid}")
}

/// Inverse of [`embed_identifier`]: the trimmed remainder of the line that
/// starts at the first prefix occurrence.
pub fn extract_identifier(text: &str) -> Option<&str> {
    let start = text.find(IDENTIFIER_PREFIX)? + IDENTIFIER_PREFIX.len();
    let rest = &text[start..];
    let line = rest.split(['\n', '\r']).next().unwrap_or(rest);
    let id = line.trim();

    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventTime, Reminders};
    use chrono::NaiveDate;

    fn event_with_description(description: Option<&str>) -> Event {
        let day = EventTime::Date(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        Event {
            id: "evt1".to_string(),
            summary: "Lunch".to_string(),
            description: description.map(str::to_string),
            start: day.clone(),
            end: day,
            color_id: None,
            reminders: Reminders::Default,
            updated: None,
        }
    }

    #[test]
    fn test_round_trip_random_uuids() {
        for _ in 0..50 {
            let uuid = uuid::Uuid::new_v4().to_string();
            let body = format!("{}\nProject: home\nStatus: pending", embed_identifier(&uuid));
            assert_eq!(extract_identifier(&body), Some(uuid.as_str()));
        }
    }

    #[test]
    fn test_round_trip_arbitrary_identifier() {
        let id = "not-a-uuid but fine";
        assert_eq!(extract_identifier(&embed_identifier(id)), Some(id));
    }

    #[test]
    fn test_extract_uses_first_occurrence() {
        let body = "Notes\nIdentifier: first\nIdentifier: second";
        assert_eq!(extract_identifier(body), Some("first"));
    }

    #[test]
    fn test_extract_trims_and_stops_at_line_break() {
        assert_eq!(extract_identifier("Identifier:   abc  \r\nStatus: x"), Some("abc"));
        assert_eq!(extract_identifier("Identifier: abc"), Some("abc"));
    }

    #[test]
    fn test_extract_missing_or_empty() {
        assert_eq!(extract_identifier("Dinner with Sam"), None);
        assert_eq!(extract_identifier("Identifier:    \nStatus: pending"), None);
        assert_eq!(extract_identifier("identifier: lowercase"), None);
    }

    #[test]
    fn test_correlate() {
        let managed = event_with_description(Some("Identifier: u1\nStatus: pending"));
        let edited = event_with_description(Some("Status: pending"));
        let empty = event_with_description(None);

        let correlator = DescriptionIdentifier;
        assert_eq!(
            correlator.correlate(&managed),
            Correlation::Managed("u1".to_string())
        );
        assert_eq!(correlator.correlate(&edited), Correlation::Unmanaged);
        assert_eq!(correlator.correlate(&empty), Correlation::Unmanaged);
    }
}
