//! Calendar adapter.
//!
//! Classes reach Google Calendar through the booking backend's
//! `POST /api/calendar` route; this crate never talks to the provider
//! directly.

use danceflow_common::{BackendClient, BoxFuture, CalendarService, ClassDetails, HasErrorKind};
use danceflow_config::BackendConfig;
use serde_json::Value;
use tracing::{error, info};

use crate::error::CalendarError;

/// Adds classes to the school calendar.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    backend: BackendClient,
    path: String,
}

impl CalendarClient {
    /// Uses the calendar route from the backend config.
    pub fn new(backend: BackendClient, config: &BackendConfig) -> Self {
        Self::with_path(backend, config.calendar_path.clone())
    }

    pub fn with_path(backend: BackendClient, path: impl Into<String>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    /// Sends `details` to the backend and returns its JSON answer as is.
    ///
    /// The input is not validated. There is no retry and no idempotency
    /// key, so repeating a call after a failure may create a duplicate
    /// entry.
    ///
    /// # Errors
    ///
    /// Every failure is logged at ERROR and returned as a [`CalendarError`]
    /// whose message is `Failed to add class to calendar`:
    /// * `Request` - network failure or body read failure
    /// * `Status` - non-2xx answer, whatever the body says
    /// * `Decode` - 2xx answer whose body is not JSON
    pub async fn add_class_to_calendar(&self, details: &ClassDetails) -> Result<Value, CalendarError> {
        match self.send(details).await {
            Ok(body) => {
                info!(title = %details.title, "Class added to calendar");
                Ok(body)
            }
            Err(err) => {
                error!(
                    kind = %err.kind(),
                    status = ?err.status(),
                    title = %details.title,
                    "Error adding class to calendar: {}",
                    err.detail()
                );
                Err(err)
            }
        }
    }

    async fn send(&self, details: &ClassDetails) -> Result<Value, CalendarError> {
        let response = self
            .backend
            .post_json(&self.path, details)
            .await
            .map_err(CalendarError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(CalendarError::Request)?;
        serde_json::from_slice(&body).map_err(CalendarError::Decode)
    }
}

impl CalendarService for CalendarClient {
    type Error = CalendarError;

    fn add_class_to_calendar<'a>(
        &'a self,
        details: &'a ClassDetails,
    ) -> BoxFuture<'a, Value, Self::Error> {
        Box::pin(CalendarClient::add_class_to_calendar(self, details))
    }
}
