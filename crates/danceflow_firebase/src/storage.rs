//! Object storage download URLs.

use tracing::debug;
use url::Url;

use crate::client::{api_error, FirebaseApp, FirebaseError};

/// Storage handle of a [`FirebaseApp`], bound to the configured bucket.
#[derive(Debug, Clone)]
pub struct StorageClient {
    app: FirebaseApp,
}

impl StorageClient {
    pub(crate) fn new(app: FirebaseApp) -> Self {
        Self { app }
    }

    pub fn bucket(&self) -> &str {
        &self.app.config().storage_bucket
    }

    /// Media URL for `object_path` in the bucket.
    ///
    /// The whole path is one URL segment, so `logos/a.png` is sent as
    /// `logos%2Fa.png`.
    pub fn download_url(&self, object_path: &str) -> Result<Url, FirebaseError> {
        let object_path = object_path.trim_start_matches('/');
        if object_path.is_empty() {
            return Err(FirebaseError::ConfigError("object path is empty".to_string()));
        }

        let mut url = self
            .app
            .storage_endpoint(&["v0", "b", self.bucket(), "o", object_path])?;
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    /// Downloads an object's bytes.
    pub async fn download(&self, object_path: &str) -> Result<Vec<u8>, FirebaseError> {
        let url = self.download_url(object_path)?;
        debug!(%url, "Downloading storage object");

        let response = self.app.http().get(url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_config;
    use crate::client::FirebaseApp;

    #[test]
    fn object_path_is_a_single_encoded_segment() {
        let storage = FirebaseApp::initialize(test_config()).unwrap().storage();

        let url = storage.download_url("schools/ritim/cover image.png").unwrap();

        assert_eq!(
            url.as_str(),
            "https://firebasestorage.googleapis.com/v0/b/ritim-dans.appspot.com/o/schools%2Fritim%2Fcover%20image.png?alt=media"
        );
    }

    #[test]
    fn empty_object_path_is_rejected() {
        let storage = FirebaseApp::initialize(test_config()).unwrap().storage();
        assert!(storage.download_url("/").is_err());
    }
}
