use danceflow_config::BackendConfig;
use reqwest::{Client, Error as ReqwestError, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Creates a new HTTP client.
///
/// A `timeout_secs` of `None` leaves requests without a deadline.
pub fn create_client(timeout_secs: Option<u64>) -> Result<Client, ReqwestError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Client for the booking backend's JSON routes.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client from the backend section of the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, ReqwestError> {
        let http = create_client(config.timeout_secs)?;
        Ok(Self::with_client(http, &config.base_url))
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs `body` as JSON to `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - The route relative to the base URL, e.g. `/api/calendar`
    /// * `body` - Serialized with `Content-Type: application/json`
    ///
    /// # Returns
    ///
    /// The raw response. Status codes are not inspected here.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ReqwestError> {
        let url = self.url(path);
        debug!(%url, "POST");
        self.http.post(url).json(body).send().await
    }
}
