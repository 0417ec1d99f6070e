// --- File: crates/danceflow_gcal/src/lib.rs ---
pub mod calendar;
pub mod error;

pub use calendar::CalendarClient;
pub use error::{CalendarError, CALENDAR_FAILURE_MESSAGE};

// Not used by the proxy client; the backend holds the calendar grant.
pub use danceflow_config::CALENDAR_SCOPE;
