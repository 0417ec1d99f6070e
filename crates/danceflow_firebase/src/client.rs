//! Firebase app handle.
//!
//! `FirebaseApp` holds the connection parameters and one HTTP client. The
//! auth, document-store and storage handles are views onto the same app, so
//! creating them is free and they share connections.

use danceflow_common::{external_service_error, DanceflowError, ErrorKind, HasErrorKind};
use danceflow_config::{FirebaseConfig, SECRET_MARKER};
use reqwest::{Client, Response};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::auth::AuthClient;
use crate::firestore::FirestoreClient;
use crate::storage::StorageClient;

const AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
const STORAGE_BASE_URL: &str = "https://firebasestorage.googleapis.com";

/// Errors that can occur when talking to Firebase
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Missing or invalid connection parameters
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Firebase API
    #[error("Firebase API error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse Firebase response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl HasErrorKind for FirebaseError {
    fn kind(&self) -> ErrorKind {
        match self {
            FirebaseError::ConfigError(_) => ErrorKind::Config,
            FirebaseError::RequestError(_) => ErrorKind::Network,
            FirebaseError::ApiError { .. } => ErrorKind::HttpStatus,
            FirebaseError::ParseError(_) => ErrorKind::Decode,
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            FirebaseError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<FirebaseError> for DanceflowError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::ConfigError(msg) => DanceflowError::ConfigError(format!("Firebase: {}", msg)),
            FirebaseError::ApiError { status_code: 401 | 403, message } => {
                DanceflowError::AuthError(message)
            }
            other => external_service_error("Firebase", &other),
        }
    }
}

struct AppInner {
    config: FirebaseConfig,
    http: Client,
    auth_base: Url,
    firestore_base: Url,
    storage_base: Url,
}

/// Handle to an initialized Firebase app.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<AppInner>,
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key stays out of logs
        f.debug_struct("FirebaseApp")
            .field("project_id", &self.inner.config.project_id)
            .field("app_id", &self.inner.config.app_id)
            .finish()
    }
}

impl FirebaseApp {
    /// Initializes the app from its connection parameters.
    ///
    /// No network I/O happens here.
    ///
    /// # Errors
    ///
    /// * `ConfigError` - a required parameter is empty, `api_key` is still
    ///   the unresolved `secret_from_env` marker, or an emulator URL is
    ///   not a valid base URL
    /// * `RequestError` - the HTTP client could not be built
    pub fn initialize(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        Self::initialize_with_client(config, Client::builder().build()?)
    }

    /// Initializes the app on an existing HTTP client.
    pub fn initialize_with_client(config: FirebaseConfig, http: Client) -> Result<Self, FirebaseError> {
        validate(&config)?;

        let auth_base = base_url(config.auth_emulator_url.as_deref(), AUTH_BASE_URL)?;
        let firestore_base = base_url(config.firestore_emulator_url.as_deref(), FIRESTORE_BASE_URL)?;
        let storage_base = base_url(config.storage_emulator_url.as_deref(), STORAGE_BASE_URL)?;

        info!(project_id = %config.project_id, "Firebase app initialized");

        Ok(Self {
            inner: Arc::new(AppInner {
                config,
                http,
                auth_base,
                firestore_base,
                storage_base,
            }),
        })
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.inner.config
    }

    pub fn project_id(&self) -> &str {
        &self.inner.config.project_id
    }

    /// Authentication client.
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }

    /// Document-store client.
    pub fn firestore(&self) -> FirestoreClient {
        FirestoreClient::new(self.clone())
    }

    /// Object-storage client.
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(self.clone())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.inner.config.api_key
    }

    pub(crate) fn auth_endpoint(&self, segments: &[&str]) -> Result<Url, FirebaseError> {
        endpoint(&self.inner.auth_base, segments)
    }

    pub(crate) fn firestore_endpoint(&self, segments: &[&str]) -> Result<Url, FirebaseError> {
        endpoint(&self.inner.firestore_base, segments)
    }

    pub(crate) fn storage_endpoint(&self, segments: &[&str]) -> Result<Url, FirebaseError> {
        endpoint(&self.inner.storage_base, segments)
    }
}

/// The app together with its three capability handles.
#[derive(Debug, Clone)]
pub struct FirebaseServices {
    pub app: FirebaseApp,
    pub auth: AuthClient,
    pub db: FirestoreClient,
    pub storage: StorageClient,
}

impl FirebaseServices {
    pub fn initialize(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        Ok(Self::from_app(FirebaseApp::initialize(config)?))
    }

    pub fn from_app(app: FirebaseApp) -> Self {
        Self {
            auth: app.auth(),
            db: app.firestore(),
            storage: app.storage(),
            app,
        }
    }
}

fn validate(config: &FirebaseConfig) -> Result<(), FirebaseError> {
    let required = [
        ("api_key", &config.api_key),
        ("auth_domain", &config.auth_domain),
        ("project_id", &config.project_id),
        ("storage_bucket", &config.storage_bucket),
        ("messaging_sender_id", &config.messaging_sender_id),
        ("app_id", &config.app_id),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(FirebaseError::ConfigError(format!("{} is empty", name)));
        }
        if value == SECRET_MARKER {
            return Err(FirebaseError::ConfigError(format!(
                "{} was not resolved from the environment",
                name
            )));
        }
    }
    Ok(())
}

fn base_url(override_url: Option<&str>, default: &str) -> Result<Url, FirebaseError> {
    let raw = override_url.unwrap_or(default);
    let url = Url::parse(raw)
        .map_err(|e| FirebaseError::ConfigError(format!("invalid base url {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(FirebaseError::ConfigError(format!("{} cannot be a base url", raw)));
    }
    Ok(url)
}

/// Appends percent-encoded `segments` to `base`.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, FirebaseError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FirebaseError::ConfigError(format!("{} cannot be a base url", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps a non-success response to `ApiError`, reading Google's
/// `{"error":{"message":..}}` envelope when present.
pub(crate) async fn api_error(response: Response) -> FirebaseError {
    let status_code = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);
    FirebaseError::ApiError {
        status_code,
        message,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> FirebaseConfig {
        FirebaseConfig {
            api_key: "AIza-test".to_string(),
            auth_domain: "ritim.firebaseapp.com".to_string(),
            project_id: "ritim-dans".to_string(),
            storage_bucket: "ritim-dans.appspot.com".to_string(),
            messaging_sender_id: "1234567890".to_string(),
            app_id: "1:1234567890:web:abcdef".to_string(),
            measurement_id: None,
            auth_emulator_url: None,
            firestore_emulator_url: None,
            storage_emulator_url: None,
        }
    }

    #[test]
    fn initializes_with_hosted_defaults() {
        let app = FirebaseApp::initialize(test_config()).unwrap();

        assert_eq!(app.project_id(), "ritim-dans");
        assert_eq!(
            app.auth_endpoint(&["v1", "accounts:signUp"]).unwrap().as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }

    #[test]
    fn empty_parameter_is_rejected() {
        let mut config = test_config();
        config.project_id = "  ".to_string();

        let err = FirebaseApp::initialize(config).unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration: project_id is empty");
    }

    #[test]
    fn unresolved_secret_marker_is_rejected() {
        let mut config = test_config();
        config.api_key = SECRET_MARKER.to_string();

        let err = FirebaseApp::initialize(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("api_key was not resolved"));
    }

    #[test]
    fn emulator_url_overrides_base() {
        let mut config = test_config();
        config.firestore_emulator_url = Some("http://localhost:8080/".to_string());

        let app = FirebaseApp::initialize(config).unwrap();

        assert_eq!(
            app.firestore_endpoint(&["v1", "projects", "ritim-dans"]).unwrap().as_str(),
            "http://localhost:8080/v1/projects/ritim-dans"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let app = FirebaseApp::initialize(test_config()).unwrap();
        assert!(!format!("{:?}", app).contains("AIza-test"));
    }

    #[test]
    fn services_share_one_app() {
        let services = FirebaseServices::initialize(test_config()).unwrap();
        assert_eq!(services.db.app().project_id(), services.app.project_id());
    }
}
