//! Drift detection between a desired event and the stored one.

use std::fmt;

use crate::event::{Event, Reminders};
use crate::mapper::{DesiredEvent, status_token};

/// The first property found out of line with the desired event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    Summary,
    Description,
    Status,
    Start,
    Color,
    Reminders,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Drift::Summary => "summary",
            Drift::Description => "description",
            Drift::Status => "status",
            Drift::Start => "start",
            Drift::Color => "color",
            Drift::Reminders => "reminders",
        };
        f.write_str(name)
    }
}

/// Compare in a fixed order and stop at the first mismatch.
///
/// Returns `None` when the stored event needs no write.
pub fn detect_drift(desired: &DesiredEvent, stored: &Event) -> Option<Drift> {
    if stored.summary != desired.summary {
        return Some(Drift::Summary);
    }

    let stored_description = stored.description.as_deref().unwrap_or_default();
    if stored_description != desired.description {
        if status_token(stored_description) != status_token(&desired.description) {
            return Some(Drift::Status);
        }
        return Some(Drift::Description);
    }

    if stored.start != desired.start {
        return Some(Drift::Start);
    }

    // Priorities without a color never reset one applied by hand.
    if let Some(color) = &desired.color_id {
        if stored.color_id.as_ref() != Some(color) {
            return Some(Drift::Color);
        }
    }

    if !reminders_match(&desired.reminders, &stored.reminders) {
        return Some(Drift::Reminders);
    }

    None
}

pub fn needs_write(desired: &DesiredEvent, stored: &Event) -> bool {
    detect_drift(desired, stored).is_some()
}

fn reminders_match(desired: &Reminders, stored: &Reminders) -> bool {
    match desired {
        Reminders::Custom(_) => {
            matches!(stored, Reminders::Custom(_))
                && stored.override_minutes() == desired.override_minutes()
        }
        // An empty custom list means "no reminders at all", not the default.
        Reminders::Default => matches!(stored, Reminders::Default),
    }
}
