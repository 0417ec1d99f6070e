use danceflow_common::{external_service_error, DanceflowError, ErrorKind, HasErrorKind};
use thiserror::Error;

/// Every calendar failure reads the same; the cause is available through
/// [`HasErrorKind::kind`] and [`std::error::Error::source`].
pub const CALENDAR_FAILURE_MESSAGE: &str = "Failed to add class to calendar";

/// Calendar-specific error types.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The request failed before a complete response arrived
    #[error("Failed to add class to calendar")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Failed to add class to calendar")]
    Status { status: u16 },

    /// The backend answered 2xx with a body that is not JSON
    #[error("Failed to add class to calendar")]
    Decode(#[source] serde_json::Error),
}

impl CalendarError {
    /// Human-readable cause for logs.
    pub fn detail(&self) -> String {
        match self {
            CalendarError::Request(e) => format!("request error: {}", e),
            CalendarError::Status { status } => format!("backend responded with status {}", status),
            CalendarError::Decode(e) => format!("invalid JSON response: {}", e),
        }
    }
}

impl HasErrorKind for CalendarError {
    fn kind(&self) -> ErrorKind {
        match self {
            CalendarError::Request(_) => ErrorKind::Network,
            CalendarError::Status { .. } => ErrorKind::HttpStatus,
            CalendarError::Decode(_) => ErrorKind::Decode,
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            CalendarError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Convert CalendarError to DanceflowError
impl From<CalendarError> for DanceflowError {
    fn from(err: CalendarError) -> Self {
        external_service_error("Calendar backend", &err)
    }
}
