//! Per-task classification of a sync run.

use std::fmt;

use crate::date_range::DateRange;
use crate::detector::{Drift, detect_drift};
use crate::event::Event;
use crate::index::CorrespondenceIndex;
use crate::mapper::{DesiredEvent, EventMapper};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No dates and nothing mirrored
    Skip,
    /// Dated outside the listed window and nothing mirrored in it. Creating
    /// would duplicate on every run, since the mirror could never be found.
    OutOfWindow,
    Create { desired: DesiredEvent },
    Update {
        event_id: String,
        desired: DesiredEvent,
        drift: Drift,
    },
    /// Dates were cleared on a mirrored task
    Delete { event_id: String },
    Unchanged { event_id: String },
}

impl Action {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Action::Create { .. } | Action::Update { .. } | Action::Delete { .. }
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Create { .. } => "+",
            Action::Update { .. } => "~",
            Action::Delete { .. } => "-",
            Action::Skip | Action::OutOfWindow | Action::Unchanged { .. } => " ",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Skip => write!(f, "skip"),
            Action::OutOfWindow => write!(f, "skip (outside window)"),
            Action::Create { .. } => write!(f, "create"),
            Action::Update { drift, .. } => write!(f, "update ({drift})"),
            Action::Delete { .. } => write!(f, "delete"),
            Action::Unchanged { .. } => write!(f, "unchanged"),
        }
    }
}

/// Decide what to do with one task given its mirrored event, if any.
///
/// The desired event is computed once here and travels with the action, so
/// the write uses exactly the value the comparison was made against.
/// `window` is the range the existing mirrors were listed from.
pub fn classify(
    task: &Task,
    existing: Option<&Event>,
    mapper: &EventMapper,
    window: &DateRange,
) -> Action {
    let desired = mapper.map(task);

    match (desired, existing) {
        (None, None) => Action::Skip,
        (None, Some(event)) => Action::Delete {
            event_id: event.id.clone(),
        },
        (Some(_), None) if !task.anchor().is_some_and(|at| window.contains(at)) => {
            Action::OutOfWindow
        }
        (Some(desired), None) => Action::Create { desired },
        (Some(desired), Some(event)) => match detect_drift(&desired, event) {
            Some(drift) => Action::Update {
                event_id: event.id.clone(),
                desired: desired.keeping_color_of(event),
                drift,
            },
            None => Action::Unchanged {
                event_id: event.id.clone(),
            },
        },
    }
}

/// User-facing message for a task scheduled on or after its due date.
pub fn schedule_warning(task: &Task) -> Option<String> {
    match (task.scheduled, task.due) {
        (Some(scheduled), Some(due)) if scheduled >= due => Some(format!(
            "\"{}\" ({}) is scheduled for {} but due {}; reminder falls back to the default offset",
            task.description,
            task.uuid,
            scheduled.to_rfc3339(),
            due.to_rfc3339()
        )),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub task: Task,
    pub action: Action,
}

/// Ordered plan for a run, in task source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    pub changes: Vec<PlannedChange>,
    pub warnings: Vec<String>,
}

impl SyncPlan {
    pub fn build(
        tasks: Vec<Task>,
        index: &CorrespondenceIndex,
        mapper: &EventMapper,
        window: &DateRange,
    ) -> Self {
        let mut plan = SyncPlan::default();

        for task in tasks {
            let action = classify(&task, index.get(&task.uuid), mapper, window);
            if action == Action::OutOfWindow {
                tracing::info!(
                    task = %task.uuid,
                    from = %window.from_rfc3339(),
                    to = %window.to_rfc3339(),
                    "task date outside the sync window, not mirrored"
                );
            } else {
                tracing::debug!(task = %task.uuid, %action, "classified");
            }

            if let Some(warning) = schedule_warning(&task) {
                plan.warnings.push(warning);
            }

            plan.changes.push(PlannedChange { task, action });
        }

        plan
    }

    pub fn writes(&self) -> impl Iterator<Item = &PlannedChange> {
        self.changes.iter().filter(|c| c.action.is_write())
    }

    pub fn has_writes(&self) -> bool {
        self.writes().next().is_some()
    }
}
