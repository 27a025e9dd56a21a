//! Conversion between Google Calendar API events and taskcal-core events.

mod from_google;
mod to_google;

pub use from_google::FromGoogle;
pub use to_google::ToGoogle;
