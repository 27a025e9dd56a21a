/// Days of calendar history scanned when building the correspondence index
pub const DEFAULT_PAST_DAYS: i64 = 30;

/// Days of calendar future scanned when building the correspondence index
pub const DEFAULT_FUTURE_DAYS: i64 = 365;

/// Length of a timed mirrored event
pub const TIMED_EVENT_MINUTES: i64 = 15;

/// Reminder used when no usable scheduled/due gap exists
pub const FALLBACK_REMINDER_MINUTES: i64 = 15;

/// Google color id for high priority tasks (Tomato)
pub const HIGH_PRIORITY_COLOR: &str = "11";

/// Google color id for medium priority tasks (Banana)
pub const MEDIUM_PRIORITY_COLOR: &str = "5";

/// Prefix on the summary of completed tasks
pub const COMPLETED_GLYPH: &str = "✓ ";

pub const SCHEDULE_WARNING: &str =
    "Warning: the scheduled date is on or after the due date, so the reminder uses the default offset.";
