//! Core of the taskcal ecosystem.
//!
//! This crate mirrors Taskwarrior tasks one way into a calendar:
//! - `task` and `event` model both sides
//! - `mapper`, `detector` and `identifier` are the pure pieces deciding what
//!   a mirrored event should look like and whether it has drifted
//! - `sync` drives a run against a [`store::TaskSource`] and a
//!   [`store::CalendarStore`]
//! - `remote` holds the provider protocol spoken by `taskcal-provider-*`
//!   binaries

pub mod config;
pub mod constants;
pub mod date_range;
pub mod detector;
pub mod error;
pub mod event;
pub mod identifier;
pub mod index;
pub mod mapper;
pub mod remote;
pub mod store;
pub mod sync;
pub mod task;
pub mod taskwarrior;

pub use error::{TaskCalError, TaskCalResult};
pub use event::{Event, EventTime, Reminder, Reminders};
pub use task::{Priority, Task, TaskStatus};
