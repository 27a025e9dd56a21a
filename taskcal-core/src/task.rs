//! Task records as exported by Taskwarrior.
//!
//! The reconciliation engine only ever reads these. Field names follow
//! `task export` so records deserialize straight from the command output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub uuid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub status: TaskStatus,
    #[serde(default, with = "task_date", skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default, with = "task_date", skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether the task carries any date that places it on the calendar.
    pub fn is_dated(&self) -> bool {
        self.due.is_some() || self.scheduled.is_some()
    }

    /// Instant the mirrored event starts at: due, else scheduled.
    pub fn anchor(&self) -> Option<DateTime<Utc>> {
        self.due.or(self.scheduled)
    }

    /// Scheduled on or after due. Only meaningful when both are set.
    pub fn has_schedule_conflict(&self) -> bool {
        matches!((self.scheduled, self.due), (Some(scheduled), Some(due)) if scheduled >= due)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Deleted,
    Waiting,
    Recurring,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Deleted => "deleted",
            TaskStatus::Waiting => "waiting",
            TaskStatus::Recurring => "recurring",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taskwarrior writes instants as `20251101T040000Z`. RFC 3339 is accepted too
/// so hand-written fixtures stay readable.
mod task_date {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y%m%dT%H%M%SZ";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, FORMAT) {
            return Ok(Some(naive.and_utc()));
        }

        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| serde::de::Error::custom(format!("invalid task date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_task_export_record() {
        let json = r#"{
            "id": 3,
            "uuid": "5b3c1f0e-8a51-4c65-9a57-1f25d2a7e001",
            "description": "Pay rent",
            "project": "home",
            "tags": ["money", "monthly"],
            "priority": "H",
            "status": "pending",
            "entry": "20251001T080000Z",
            "due": "20251101T000000Z",
            "urgency": 9.2
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.uuid, "5b3c1f0e-8a51-4c65-9a57-1f25d2a7e001");
        assert_eq!(task.project.as_deref(), Some("home"));
        assert_eq!(task.tags, vec!["money", "monthly"]);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due, Some(Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()));
        assert_eq!(task.scheduled, None);
    }

    #[test]
    fn test_parse_minimal_record() {
        let json = r#"{"uuid": "u1", "description": "Inbox", "status": "waiting"}"#;

        let task: Task = serde_json::from_str(json).unwrap();

        assert!(task.tags.is_empty());
        assert_eq!(task.priority, None);
        assert!(!task.is_dated());
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let json = r#"{"uuid": "u1", "status": "pending", "scheduled": "2025-11-05T17:00:00+01:00"}"#;

        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(
            task.scheduled,
            Some(Utc.with_ymd_and_hms(2025, 11, 5, 16, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_reject_garbage_date() {
        let json = r#"{"uuid": "u1", "status": "pending", "due": "tomorrow"}"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_schedule_conflict() {
        let due = Utc.with_ymd_and_hms(2025, 11, 5, 18, 0, 0).unwrap();
        let mut task: Task =
            serde_json::from_str(r#"{"uuid": "u3", "status": "pending"}"#).unwrap();

        task.due = Some(due);
        task.scheduled = Some(due);
        assert!(task.has_schedule_conflict());

        task.scheduled = Some(due - chrono::Duration::minutes(1));
        assert!(!task.has_schedule_conflict());

        task.due = None;
        assert!(!task.has_schedule_conflict());
    }
}
