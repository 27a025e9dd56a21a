//! The two external collaborators of a sync run.

use crate::date_range::DateRange;
use crate::error::TaskCalResult;
use crate::event::Event;
use crate::task::Task;

/// Read-only snapshot of local tasks.
#[allow(async_fn_in_trait)]
pub trait TaskSource {
    /// Tasks matching `filter`, in the source's order. The filter is passed
    /// through untouched.
    async fn export(&self, filter: &str) -> TaskCalResult<Vec<Task>>;
}

/// Remote calendar holding the mirrored events.
#[allow(async_fn_in_trait)]
pub trait CalendarStore {
    /// Events overlapping `range`, recurring events expanded to instances.
    async fn list_events(&self, range: &DateRange) -> TaskCalResult<Vec<Event>>;

    /// Create an event; the returned copy carries the assigned id.
    async fn insert_event(&self, event: &Event) -> TaskCalResult<Event>;

    /// Replace the event with id `event_id`.
    async fn update_event(&self, event_id: &str, event: &Event) -> TaskCalResult<Event>;

    async fn delete_event(&self, event_id: &str) -> TaskCalResult<()>;
}
