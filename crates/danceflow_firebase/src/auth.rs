//! Email/password authentication against the Identity Toolkit API.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{api_error, FirebaseApp, FirebaseError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Tokens for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    /// Firebase user id
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Token lifetime in seconds, as a decimal string
    pub expires_in: String,
}

impl AuthSession {
    pub fn expires_in_secs(&self) -> Option<u64> {
        self.expires_in.parse().ok()
    }
}

/// Authentication handle of a [`FirebaseApp`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    app: FirebaseApp,
}

impl AuthClient {
    pub(crate) fn new(app: FirebaseApp) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    /// Signs in an existing user.
    ///
    /// Rejected credentials surface as `ApiError` with Firebase's code in
    /// the message, e.g. `INVALID_PASSWORD`.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, FirebaseError> {
        self.password_call("accounts:signInWithPassword", email, password).await
    }

    /// Creates a user and signs them in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, FirebaseError> {
        self.password_call("accounts:signUp", email, password).await
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, FirebaseError> {
        let mut url = self.app.auth_endpoint(&["v1", action])?;
        url.query_pairs_mut().append_pair("key", self.app.api_key());

        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        debug!(action, "Calling Firebase auth");
        let response = self.app.http().post(url).json(&body).send().await?;
        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!(action, "Firebase auth rejected: {}", err);
            return Err(err);
        }

        Ok(response.json::<AuthSession>().await?)
    }
}
