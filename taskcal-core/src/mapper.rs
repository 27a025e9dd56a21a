//! Task → desired calendar event.
//!
//! The [`DesiredEvent`] produced here is the only definition of what a
//! mirrored event should look like. It is used verbatim for inserts and
//! updates, and the change detector compares stored events against it.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::constants::{
    COMPLETED_GLYPH, FALLBACK_REMINDER_MINUTES, HIGH_PRIORITY_COLOR, MEDIUM_PRIORITY_COLOR,
    SCHEDULE_WARNING, TIMED_EVENT_MINUTES,
};
use crate::event::{Event, EventTime, Reminders};
use crate::identifier::embed_identifier;
use crate::task::{Priority, Task, TaskStatus};

pub const STATUS_MARKER: &str = "Status: ";

#[derive(Debug, Clone, PartialEq)]
pub struct DesiredEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    /// `None` means "no opinion": an existing color is left alone.
    pub color_id: Option<String>,
    pub reminders: Reminders,
    /// Scheduled on or after due
    pub warning: bool,
}

impl DesiredEvent {
    /// Materialize as a provider-neutral event. Pass an empty id for inserts.
    pub fn to_event(&self, id: &str) -> Event {
        Event {
            id: id.to_string(),
            summary: self.summary.clone(),
            description: Some(self.description.clone()),
            start: self.start.clone(),
            end: self.end.clone(),
            color_id: self.color_id.clone(),
            reminders: self.reminders.clone(),
            updated: None,
        }
    }

    /// Updates replace the whole event, so a color this event has no
    /// opinion on is taken over from the stored one.
    pub fn keeping_color_of(mut self, stored: &Event) -> Self {
        if self.color_id.is_none() {
            self.color_id = stored.color_id.clone();
        }
        self
    }
}

/// Value after the first `Status: ` marker, up to the end of that line.
pub fn status_token(description: &str) -> Option<&str> {
    let start = description.find(STATUS_MARKER)? + STATUS_MARKER.len();
    description[start..].lines().next().map(str::trim)
}

/// Maps tasks to desired events in a fixed time zone.
///
/// The zone decides whether a due instant falls on local midnight, which is
/// how Taskwarrior represents date-only dues.
#[derive(Debug, Clone, Copy)]
pub struct EventMapper {
    tz: Tz,
}

impl EventMapper {
    pub fn new(tz: Tz) -> Self {
        EventMapper { tz }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// `None` for tasks without due and scheduled dates.
    pub fn map(&self, task: &Task) -> Option<DesiredEvent> {
        let anchor = task.anchor()?;
        let (start, end) = self.timing(anchor);
        let warning = task.has_schedule_conflict();

        Some(DesiredEvent {
            summary: summary(task),
            description: description(task, warning),
            start,
            end,
            color_id: color_id(task.priority).map(str::to_string),
            reminders: reminders(task, warning),
            warning,
        })
    }

    fn timing(&self, anchor: DateTime<Utc>) -> (EventTime, EventTime) {
        let local = anchor.with_timezone(&self.tz);

        if local.time() == NaiveTime::MIN {
            let day = EventTime::Date(local.date_naive());
            (day.clone(), day)
        } else {
            (
                EventTime::DateTime(anchor),
                EventTime::DateTime(anchor + Duration::minutes(TIMED_EVENT_MINUTES)),
            )
        }
    }
}

fn summary(task: &Task) -> String {
    if task.status == TaskStatus::Completed {
        format!("{COMPLETED_GLYPH}{}", task.description)
    } else {
        task.description.clone()
    }
}

fn description(task: &Task, warning: bool) -> String {
    let mut body = format!(
        "{}\nProject: {}\nTags: {}\n{STATUS_MARKER}{}",
        embed_identifier(&task.uuid),
        task.project.as_deref().unwrap_or_default(),
        task.tags.join(", "),
        task.status,
    );

    if warning {
        body.push_str("\n\n");
        body.push_str(SCHEDULE_WARNING);
    }

    body
}

fn color_id(priority: Option<Priority>) -> Option<&'static str> {
    match priority {
        Some(Priority::High) => Some(HIGH_PRIORITY_COLOR),
        Some(Priority::Medium) => Some(MEDIUM_PRIORITY_COLOR),
        _ => None,
    }
}

/// The event is anchored at due, so an offset of `due - scheduled` makes
/// the notification fire at the scheduled instant.
fn reminders(task: &Task, warning: bool) -> Reminders {
    let Some(scheduled) = task.scheduled else {
        return Reminders::Default;
    };

    match task.due {
        Some(due) if !warning => Reminders::popup((due - scheduled).num_minutes()),
        _ => Reminders::popup(FALLBACK_REMINDER_MINUTES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Berlin;

    fn task(uuid: &str, description: &str) -> Task {
        Task {
            uuid: uuid.to_string(),
            description: description.to_string(),
            project: None,
            tags: vec![],
            priority: None,
            status: TaskStatus::Pending,
            due: None,
            scheduled: None,
        }
    }

    fn berlin(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Berlin
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn mapper() -> EventMapper {
        EventMapper::new(Berlin)
    }

    #[test]
    fn test_undated_task_maps_to_nothing() {
        assert!(mapper().map(&task("u0", "Someday")).is_none());
    }

    #[test]
    fn test_local_midnight_is_all_day() {
        let mut t = task("u1", "Pay rent");
        t.due = Some(berlin(2025, 11, 1, 0, 0));

        let desired = mapper().map(&t).unwrap();
        let day = EventTime::Date(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());

        assert_eq!(desired.start, day);
        assert_eq!(desired.end, day);
        assert_eq!(desired.summary, "Pay rent");
        assert_eq!(desired.reminders, Reminders::Default);
        assert_eq!(desired.color_id, None);
        assert!(!desired.warning);
    }

    #[test]
    fn test_utc_midnight_is_not_local_midnight() {
        let mut t = task("u1", "Pay rent");
        t.due = Some(Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());

        let desired = mapper().map(&t).unwrap();

        assert!(!desired.start.is_all_day());
    }

    #[test]
    fn test_timed_event_spans_fifteen_minutes() {
        let mut t = task("u2", "Call plumber");
        t.due = Some(berlin(2025, 11, 5, 18, 0));
        t.scheduled = Some(berlin(2025, 11, 5, 17, 0));

        let desired = mapper().map(&t).unwrap();

        assert_eq!(desired.start, EventTime::DateTime(berlin(2025, 11, 5, 18, 0)));
        assert_eq!(desired.end, EventTime::DateTime(berlin(2025, 11, 5, 18, 15)));
        assert_eq!(desired.reminders, Reminders::popup(60));
    }

    #[test]
    fn test_one_second_past_midnight_is_timed() {
        let mut t = task("u1", "Edge");
        t.due = Some(berlin(2025, 11, 1, 0, 0) + Duration::seconds(1));

        let desired = mapper().map(&t).unwrap();

        assert!(!desired.start.is_all_day());
    }

    #[test]
    fn test_reminder_is_gap_in_minutes() {
        let due = berlin(2025, 11, 5, 18, 0);
        let mut t = task("u2", "Submit report");
        t.due = Some(due);
        t.scheduled = Some(due - Duration::minutes(90));

        let desired = mapper().map(&t).unwrap();

        assert_eq!(desired.reminders.override_minutes(), Some(90));
    }

    #[test]
    fn test_reminder_gap_rounds_down() {
        let due = berlin(2025, 11, 5, 18, 0);
        let mut t = task("u2", "Submit report");
        t.due = Some(due);
        t.scheduled = Some(due - Duration::seconds(90 * 60 + 59));

        let desired = mapper().map(&t).unwrap();

        assert_eq!(desired.reminders.override_minutes(), Some(90));
    }

    #[test]
    fn test_scheduled_after_due_warns_and_falls_back() {
        let mut t = task("u3", "Backwards");
        t.due = Some(berlin(2025, 11, 5, 18, 0));
        t.scheduled = Some(berlin(2025, 11, 5, 19, 0));

        let desired = mapper().map(&t).unwrap();

        assert!(desired.warning);
        assert_eq!(desired.reminders, Reminders::popup(15));
        assert!(desired.description.contains(SCHEDULE_WARNING));
        assert_eq!(desired.start, EventTime::DateTime(berlin(2025, 11, 5, 18, 0)));
    }

    #[test]
    fn test_scheduled_equal_due_warns() {
        let at = berlin(2025, 11, 5, 18, 0);
        let mut t = task("u3", "Same time");
        t.due = Some(at);
        t.scheduled = Some(at);

        let desired = mapper().map(&t).unwrap();

        assert!(desired.warning);
        assert_eq!(desired.reminders.override_minutes(), Some(15));
    }

    #[test]
    fn test_scheduled_only_anchors_and_falls_back() {
        let mut t = task("u4", "Start draft");
        t.scheduled = Some(berlin(2025, 11, 5, 9, 30));

        let desired = mapper().map(&t).unwrap();

        assert_eq!(desired.start, EventTime::DateTime(berlin(2025, 11, 5, 9, 30)));
        assert_eq!(desired.reminders, Reminders::popup(15));
        assert!(!desired.warning);
    }

    #[test]
    fn test_priority_colors() {
        let mut t = task("u5", "Colorful");
        t.due = Some(berlin(2025, 11, 5, 9, 30));

        t.priority = Some(Priority::High);
        assert_eq!(mapper().map(&t).unwrap().color_id.as_deref(), Some("11"));

        t.priority = Some(Priority::Medium);
        assert_eq!(mapper().map(&t).unwrap().color_id.as_deref(), Some("5"));

        t.priority = Some(Priority::Low);
        assert_eq!(mapper().map(&t).unwrap().color_id, None);

        t.priority = None;
        assert_eq!(mapper().map(&t).unwrap().color_id, None);
    }

    #[test]
    fn test_completed_summary_and_description_template() {
        let mut t = task("u6", "Write tests");
        t.status = TaskStatus::Completed;
        t.project = Some("taskcal".to_string());
        t.tags = vec!["dev".to_string(), "rust".to_string()];
        t.due = Some(berlin(2025, 11, 5, 9, 30));

        let desired = mapper().map(&t).unwrap();

        assert_eq!(desired.summary, "✓ Write tests");
        assert_eq!(
            desired.description,
            "Identifier: u6\nProject: taskcal\nTags: dev, rust\nStatus: completed"
        );
        assert_eq!(status_token(&desired.description), Some("completed"));
    }

    #[test]
    fn test_to_event_keeps_desired_fields() {
        let mut t = task("u7", "Dentist");
        t.due = Some(berlin(2025, 11, 5, 9, 30));
        t.priority = Some(Priority::High);

        let desired = mapper().map(&t).unwrap();
        let event = desired.to_event("evt-7");

        assert_eq!(event.id, "evt-7");
        assert_eq!(event.summary, desired.summary);
        assert_eq!(event.description.as_deref(), Some(desired.description.as_str()));
        assert_eq!(event.color_id.as_deref(), Some("11"));
        assert_eq!(event.reminders, Reminders::Default);
    }

    #[test]
    fn test_keeping_color_only_fills_missing_color() {
        let mut t = task("u8", "Plants");
        t.due = Some(berlin(2025, 11, 5, 9, 30));
        let mut stored = mapper().map(&t).unwrap().to_event("evt-8");
        stored.color_id = Some("9".to_string());

        let kept = mapper().map(&t).unwrap().keeping_color_of(&stored);
        assert_eq!(kept.color_id.as_deref(), Some("9"));

        t.priority = Some(Priority::High);
        let asserted = mapper().map(&t).unwrap().keeping_color_of(&stored);
        assert_eq!(asserted.color_id.as_deref(), Some("11"));
    }
}
