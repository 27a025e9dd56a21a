use chrono::Days;
use taskcal_core::event::{Event, EventTime, Reminders};

pub trait ToGoogle {
    fn to_google(&self) -> google_calendar::types::Event;
}

impl ToGoogle for Event {
    fn to_google(&self) -> google_calendar::types::Event {
        let start = event_time_to_google(&self.start);
        let end = match &self.end {
            EventTime::Date(d) => event_time_to_google(&EventTime::Date(
                d.checked_add_days(Days::new(1)).unwrap_or(*d),
            )),
            other => event_time_to_google(other),
        };

        // Always sent explicitly, so clearing custom reminders restores the
        // calendar defaults instead of leaving the old overrides in place.
        let reminders = match &self.reminders {
            Reminders::Default => google_calendar::types::Reminders {
                overrides: Vec::new(),
                use_default: true,
            },
            Reminders::Custom(list) => google_calendar::types::Reminders {
                overrides: list
                    .iter()
                    .map(|r| google_calendar::types::EventReminder {
                        method: "popup".to_string(),
                        minutes: r.minutes,
                    })
                    .collect(),
                use_default: false,
            },
        };

        google_calendar::types::Event {
            id: self.id.clone(),
            summary: self.summary.clone(),
            description: self.description.clone().unwrap_or_default(),
            start: Some(start),
            end: Some(end),
            color_id: self.color_id.clone().unwrap_or_default(),
            reminders: Some(reminders),
            ..Default::default()
        }
    }
}

fn event_time_to_google(time: &EventTime) -> google_calendar::types::EventDateTime {
    match time {
        EventTime::Date(d) => google_calendar::types::EventDateTime {
            date: Some(*d),
            date_time: None,
            time_zone: String::new(),
        },
        EventTime::DateTime(dt) => google_calendar::types::EventDateTime {
            date: None,
            date_time: Some(*dt),
            time_zone: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn all_day(day: NaiveDate) -> Event {
        Event {
            id: String::new(),
            summary: "Pay rent".to_string(),
            description: Some("Identifier: abc".to_string()),
            start: EventTime::Date(day),
            end: EventTime::Date(day),
            color_id: None,
            reminders: Reminders::Default,
            updated: None,
        }
    }

    #[test]
    fn test_all_day_end_becomes_exclusive() {
        let day = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let google = all_day(day).to_google();

        assert_eq!(google.start.unwrap().date, Some(day));
        assert_eq!(
            google.end.unwrap().date,
            NaiveDate::from_ymd_opt(2027, 1, 1)
        );
        assert_eq!(google.color_id, "");
        assert_eq!(google.description, "Identifier: abc");
    }

    #[test]
    fn test_default_reminders_are_explicit() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let reminders = all_day(day).to_google().reminders.unwrap();

        assert!(reminders.use_default);
        assert!(reminders.overrides.is_empty());
    }

    #[test]
    fn test_custom_reminders_disable_defaults() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let mut event = all_day(day);
        event.reminders = Reminders::popup(15);
        event.color_id = Some("5".to_string());

        let google = event.to_google();
        let reminders = google.reminders.unwrap();
        assert!(!reminders.use_default);
        assert_eq!(reminders.overrides.len(), 1);
        assert_eq!(reminders.overrides[0].minutes, 15);
        assert_eq!(reminders.overrides[0].method, "popup");
        assert_eq!(google.color_id, "5");
    }
}
