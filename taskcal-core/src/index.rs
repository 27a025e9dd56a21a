//! Per-run lookup from task uuid to its mirrored event.

use std::collections::HashMap;

use crate::date_range::DateRange;
use crate::error::{TaskCalError, TaskCalResult};
use crate::event::Event;
use crate::identifier::{Correlation, Correlator};
use crate::store::CalendarStore;

/// Built from scratch on every run and thrown away afterwards.
#[derive(Debug, Default)]
pub struct CorrespondenceIndex {
    by_identifier: HashMap<String, Event>,
    foreign: usize,
    duplicates: usize,
}

impl CorrespondenceIndex {
    /// List the window once and index every managed event in it.
    ///
    /// A listing failure aborts: an incomplete index would turn existing
    /// mirrors into duplicates.
    pub async fn build<C: CalendarStore>(
        store: &C,
        range: &DateRange,
        correlator: &dyn Correlator,
    ) -> TaskCalResult<Self> {
        let events = store
            .list_events(range)
            .await
            .map_err(|e| TaskCalError::ListEvents(Box::new(e)))?;

        Ok(Self::from_events(events, correlator))
    }

    /// When two events embed the same identifier, keep the one updated most
    /// recently; on a tie (or missing timestamps) the later-listed one wins.
    pub fn from_events(events: Vec<Event>, correlator: &dyn Correlator) -> Self {
        let mut index = CorrespondenceIndex::default();

        for event in events {
            let Correlation::Managed(identifier) = correlator.correlate(&event) else {
                index.foreign += 1;
                continue;
            };

            match index.by_identifier.get(&identifier) {
                Some(existing) => {
                    index.duplicates += 1;
                    tracing::warn!(
                        task = %identifier,
                        kept = %existing.id,
                        other = %event.id,
                        "multiple events carry the same task identifier"
                    );
                    if existing.updated <= event.updated {
                        index.by_identifier.insert(identifier, event);
                    }
                }
                None => {
                    index.by_identifier.insert(identifier, event);
                }
            }
        }

        index
    }

    pub fn get(&self, identifier: &str) -> Option<&Event> {
        self.by_identifier.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Events skipped because they carry no identifier
    pub fn foreign_count(&self) -> usize {
        self.foreign
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventTime, Reminders};
    use crate::identifier::DescriptionIdentifier;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn event(id: &str, description: &str, updated: Option<DateTime<Utc>>) -> Event {
        let day = EventTime::Date(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        Event {
            id: id.to_string(),
            summary: id.to_string(),
            description: Some(description.to_string()),
            start: day.clone(),
            end: day,
            color_id: None,
            reminders: Reminders::Default,
            updated,
        }
    }

    fn ts(h: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2025, 10, 1, h, 0, 0).unwrap())
    }

    #[test]
    fn test_foreign_events_are_dropped() {
        let index = CorrespondenceIndex::from_events(
            vec![
                event("e1", "Identifier: u1\nStatus: pending", None),
                event("e2", "Team lunch", None),
            ],
            &DescriptionIdentifier,
        );

        assert_eq!(index.len(), 1);
        assert_eq!(index.foreign_count(), 1);
        assert_eq!(index.get("u1").map(|e| e.id.as_str()), Some("e1"));
        assert!(index.get("Team lunch").is_none());
    }

    #[test]
    fn test_duplicate_prefers_most_recently_updated() {
        let index = CorrespondenceIndex::from_events(
            vec![
                event("newer", "Identifier: u1", ts(12)),
                event("older", "Identifier: u1", ts(8)),
            ],
            &DescriptionIdentifier,
        );

        assert_eq!(index.get("u1").map(|e| e.id.as_str()), Some("newer"));
        assert_eq!(index.duplicate_count(), 1);
    }

    #[test]
    fn test_duplicate_tie_keeps_later_listed() {
        let index = CorrespondenceIndex::from_events(
            vec![
                event("first", "Identifier: u1", None),
                event("second", "Identifier: u1", None),
            ],
            &DescriptionIdentifier,
        );

        assert_eq!(index.get("u1").map(|e| e.id.as_str()), Some("second"));
    }
}
