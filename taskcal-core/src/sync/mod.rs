//! One-way reconciliation of tasks into calendar events.

mod driver;
mod plan;
mod report;

pub use driver::Reconciler;
pub use plan::{Action, PlannedChange, SyncPlan, classify, schedule_warning};
pub use report::SyncReport;
