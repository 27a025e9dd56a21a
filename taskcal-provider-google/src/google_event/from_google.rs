use anyhow::{Result, bail};
use chrono::Days;
use taskcal_core::event::{Event, EventTime, Reminder, Reminders};

pub trait FromGoogle {
    fn from_google(event: google_calendar::types::Event) -> Result<Self>
    where
        Self: Sized;
}

impl FromGoogle for Event {
    fn from_google(event: google_calendar::types::Event) -> Result<Self> {
        let start = match event.start.as_ref().and_then(google_time) {
            Some(start) => start,
            None => bail!("Event {} has no start time", event.id),
        };

        // Google's all-day end date is exclusive; taskcal's is inclusive
        let end = match event.end.as_ref().and_then(google_time) {
            Some(EventTime::Date(d)) => EventTime::Date(d.checked_sub_days(Days::new(1)).unwrap_or(d)),
            Some(end) => end,
            None => bail!("Event {} has no end time", event.id),
        };

        let reminders = match event.reminders {
            Some(ref rem) if !rem.use_default => Reminders::Custom(
                rem.overrides
                    .iter()
                    .map(|r| Reminder { minutes: r.minutes })
                    .collect(),
            ),
            _ => Reminders::Default,
        };

        Ok(Event {
            id: event.id,
            summary: event.summary,
            description: if event.description.is_empty() {
                None
            } else {
                Some(event.description)
            },
            start,
            end,
            color_id: if event.color_id.is_empty() {
                None
            } else {
                Some(event.color_id)
            },
            reminders,
            updated: event.updated,
        })
    }
}

fn google_time(time: &google_calendar::types::EventDateTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}
