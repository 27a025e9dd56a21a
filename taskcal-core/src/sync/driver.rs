//! Orchestrates one reconciliation run.

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::constants::{DEFAULT_FUTURE_DAYS, DEFAULT_PAST_DAYS};
use crate::date_range::DateRange;
use crate::error::{TaskCalError, TaskCalResult};
use crate::identifier::{Correlator, DescriptionIdentifier};
use crate::index::CorrespondenceIndex;
use crate::mapper::EventMapper;
use crate::store::{CalendarStore, TaskSource};
use crate::sync::plan::{Action, PlannedChange, SyncPlan};
use crate::sync::report::SyncReport;

/// One-way mirror of a task source into a calendar store.
///
/// Runs are single-flight: while one `plan` or `sync` is in progress, other
/// calls on the same reconciler fail with [`TaskCalError::SyncInProgress`].
pub struct Reconciler<S, C> {
    source: S,
    store: C,
    mapper: EventMapper,
    correlator: Box<dyn Correlator>,
    past_days: i64,
    future_days: i64,
    running: Mutex<()>,
}

impl<S: TaskSource, C: CalendarStore> Reconciler<S, C> {
    pub fn new(source: S, store: C, mapper: EventMapper) -> Self {
        Reconciler {
            source,
            store,
            mapper,
            correlator: Box::new(DescriptionIdentifier),
            past_days: DEFAULT_PAST_DAYS,
            future_days: DEFAULT_FUTURE_DAYS,
            running: Mutex::new(()),
        }
    }

    pub fn with_window(mut self, past_days: i64, future_days: i64) -> Self {
        self.past_days = past_days;
        self.future_days = future_days;
        self
    }

    pub fn with_correlator(mut self, correlator: Box<dyn Correlator>) -> Self {
        self.correlator = correlator;
        self
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Classify every task without writing anything.
    pub async fn plan(&self, filter: &str, cancel: &CancellationToken) -> TaskCalResult<SyncPlan> {
        let _running = self
            .running
            .try_lock()
            .map_err(|_| TaskCalError::SyncInProgress)?;

        self.build_plan(filter, cancel).await
    }

    /// Plan, then apply every write in task order.
    ///
    /// Cancelling before the first write fails with
    /// [`TaskCalError::Cancelled`]. Once writing has started, the run stops
    /// before the next write and returns what was done so far with
    /// `cancelled` set.
    pub async fn sync(&self, filter: &str, cancel: &CancellationToken) -> TaskCalResult<SyncReport> {
        let _running = self
            .running
            .try_lock()
            .map_err(|_| TaskCalError::SyncInProgress)?;

        let plan = self.build_plan(filter, cancel).await?;
        let report = self.apply(plan, cancel).await?;

        tracing::info!(
            total = report.total,
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            skipped = report.skipped,
            failed = report.failed,
            warnings = report.warnings.len(),
            cancelled = report.cancelled,
            "sync finished"
        );

        Ok(report)
    }

    async fn build_plan(&self, filter: &str, cancel: &CancellationToken) -> TaskCalResult<SyncPlan> {
        ensure_not_cancelled(cancel)?;
        let tasks = self
            .source
            .export(filter)
            .await
            .map_err(|e| TaskCalError::ExportTasks(Box::new(e)))?;

        ensure_not_cancelled(cancel)?;
        let range = DateRange::around(Utc::now(), self.past_days, self.future_days);
        let index = CorrespondenceIndex::build(&self.store, &range, self.correlator.as_ref()).await?;

        tracing::debug!(
            tasks = tasks.len(),
            mirrored = index.len(),
            foreign = index.foreign_count(),
            "fetched both sides"
        );

        Ok(SyncPlan::build(tasks, &index, &self.mapper, &range))
    }

    async fn apply(&self, plan: SyncPlan, cancel: &CancellationToken) -> TaskCalResult<SyncReport> {
        let mut report = SyncReport {
            warnings: plan.warnings,
            ..SyncReport::default()
        };

        for PlannedChange { task, action } in plan.changes {
            if action.is_write() && cancel.is_cancelled() {
                if report.writes() + report.failed == 0 {
                    return Err(TaskCalError::Cancelled);
                }
                tracing::warn!(task = %task.uuid, "cancelled, remaining tasks not written");
                report.cancelled = true;
                break;
            }
            report.total += 1;

            match action {
                Action::Skip | Action::OutOfWindow => report.skipped += 1,
                Action::Unchanged { .. } => report.unchanged += 1,
                Action::Create { desired } => {
                    match self.store.insert_event(&desired.to_event("")).await {
                        Ok(created) => {
                            tracing::debug!(task = %task.uuid, event = %created.id, "created");
                            report.created += 1;
                        }
                        Err(e) => {
                            tracing::warn!(task = %task.uuid, error = %e, "failed to create event");
                            report.failed += 1;
                        }
                    }
                }
                Action::Update {
                    event_id,
                    desired,
                    drift,
                } => {
                    match self
                        .store
                        .update_event(&event_id, &desired.to_event(&event_id))
                        .await
                    {
                        Ok(_) => {
                            tracing::debug!(task = %task.uuid, event = %event_id, %drift, "updated");
                            report.updated += 1;
                        }
                        Err(e) => {
                            tracing::warn!(task = %task.uuid, event = %event_id, error = %e, "failed to update event");
                            report.failed += 1;
                        }
                    }
                }
                Action::Delete { event_id } => {
                    match self.store.delete_event(&event_id).await {
                        Ok(()) => {
                            tracing::debug!(task = %task.uuid, event = %event_id, "deleted");
                            report.deleted += 1;
                        }
                        Err(e) => {
                            tracing::warn!(task = %task.uuid, event = %event_id, error = %e, "failed to delete event");
                            report.failed += 1;
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> TaskCalResult<()> {
    if cancel.is_cancelled() {
        Err(TaskCalError::Cancelled)
    } else {
        Ok(())
    }
}
