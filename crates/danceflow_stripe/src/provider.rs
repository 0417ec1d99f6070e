//! Hosted checkout provider.
//!
//! The provider handle is what the browser SDK would hand back after loading
//! with the publishable key. Loading is behind [`ProviderLoader`] so the
//! payment client can resolve it lazily, once.

use danceflow_common::{BoxFuture, CheckoutRedirect};
use danceflow_config::StripeConfig;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::PaymentError;

/// Checkout session as returned by the payment-intent route.
///
/// The id may arrive as `id`, `sessionId` or `session_id`; when several are
/// present the first of that order wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCheckoutSession")]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted checkout URL, when the backend already knows it
    pub url: Option<String>,
}

#[derive(Deserialize)]
struct RawCheckoutSession {
    id: Option<String>,
    #[serde(rename = "sessionId")]
    session_id_camel: Option<String>,
    session_id: Option<String>,
    url: Option<String>,
}

impl TryFrom<RawCheckoutSession> for CheckoutSession {
    type Error = String;

    fn try_from(raw: RawCheckoutSession) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.session_id_camel)
            .or(raw.session_id)
            .ok_or_else(|| "missing field `id` (or `sessionId` / `session_id`)".to_string())?;
        Ok(Self { id, url: raw.url })
    }
}

/// A loaded hosted checkout client.
pub trait CheckoutProvider: Send + Sync {
    /// Hands the session to the hosted checkout and returns where the user
    /// has to be sent.
    fn redirect_to_checkout<'a>(
        &'a self,
        session: &'a CheckoutSession,
    ) -> BoxFuture<'a, CheckoutRedirect, PaymentError>;
}

/// Produces the checkout provider handle.
pub trait ProviderLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'_, Arc<dyn CheckoutProvider>, PaymentError>;
}

/// Loads the Stripe hosted checkout from the publishable key.
#[derive(Debug, Clone)]
pub struct StripeCheckoutLoader {
    publishable_key: String,
    checkout_base_url: String,
}

impl StripeCheckoutLoader {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            publishable_key: config.publishable_key.clone(),
            checkout_base_url: config.checkout_base_url.clone(),
        }
    }
}

impl ProviderLoader for StripeCheckoutLoader {
    fn load(&self) -> BoxFuture<'_, Arc<dyn CheckoutProvider>, PaymentError> {
        Box::pin(async move {
            let key = self.publishable_key.trim();
            if !key.starts_with("pk_") {
                return Err(PaymentError::ProviderUnavailable(
                    "publishable key must start with pk_".to_string(),
                ));
            }

            let base = Url::parse(&self.checkout_base_url).map_err(|e| {
                PaymentError::ProviderUnavailable(format!("invalid checkout base url: {}", e))
            })?;

            debug!(live = key.starts_with("pk_live_"), "Stripe checkout loaded");
            let provider: Arc<dyn CheckoutProvider> = Arc::new(StripeHostedCheckout { base });
            Ok(provider)
        })
    }
}

/// Stripe's hosted checkout page.
#[derive(Debug, Clone)]
pub struct StripeHostedCheckout {
    base: Url,
}

impl StripeHostedCheckout {
    fn checkout_url(&self, session: &CheckoutSession) -> Result<Url, PaymentError> {
        match session.url.as_deref() {
            Some(raw) => Url::parse(raw)
                .map_err(|e| PaymentError::RedirectError(format!("invalid checkout url: {}", e))),
            None => {
                let mut url = self.base.clone();
                url.path_segments_mut()
                    .map_err(|_| PaymentError::RedirectError("checkout base cannot hold a path".to_string()))?
                    .pop_if_empty()
                    .push(&session.id);
                Ok(url)
            }
        }
    }
}

impl CheckoutProvider for StripeHostedCheckout {
    fn redirect_to_checkout<'a>(
        &'a self,
        session: &'a CheckoutSession,
    ) -> BoxFuture<'a, CheckoutRedirect, PaymentError> {
        Box::pin(async move {
            if session.id.trim().is_empty() {
                return Err(PaymentError::RedirectError("missing session id".to_string()));
            }

            let url = self.checkout_url(session)?;
            if !matches!(url.scheme(), "https" | "http") {
                return Err(PaymentError::RedirectError(format!(
                    "refusing to redirect to {} URL",
                    url.scheme()
                )));
            }

            Ok(CheckoutRedirect {
                session_id: session.id.clone(),
                url: url.into(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(key: &str) -> StripeCheckoutLoader {
        StripeCheckoutLoader::new(&StripeConfig::new(key))
    }

    #[tokio::test]
    async fn rejects_non_publishable_key() {
        let err = loader("sk_test_secret").load().await.err().unwrap();
        assert!(matches!(err, PaymentError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn builds_url_from_session_id() {
        let provider = loader("pk_test_123").load().await.unwrap();
        let session = CheckoutSession {
            id: "cs_test_abc".to_string(),
            url: None,
        };

        let redirect = provider.redirect_to_checkout(&session).await.unwrap();

        assert_eq!(redirect.session_id, "cs_test_abc");
        assert_eq!(redirect.url, "https://checkout.stripe.com/c/pay/cs_test_abc");
    }

    #[tokio::test]
    async fn prefers_backend_url() {
        let provider = loader("pk_test_123").load().await.unwrap();
        let session = CheckoutSession {
            id: "cs_test_abc".to_string(),
            url: Some("https://checkout.stripe.com/c/pay/cs_test_abc#fid".to_string()),
        };

        let redirect = provider.redirect_to_checkout(&session).await.unwrap();

        assert_eq!(redirect.url, "https://checkout.stripe.com/c/pay/cs_test_abc#fid");
    }

    #[tokio::test]
    async fn empty_session_id_is_refused() {
        let provider = loader("pk_test_123").load().await.unwrap();
        let session = CheckoutSession {
            id: "  ".to_string(),
            url: None,
        };

        let err = provider.redirect_to_checkout(&session).await.unwrap_err();
        assert!(matches!(err, PaymentError::RedirectError(_)));
    }

    #[test]
    fn session_id_accepts_aliases() {
        let a: CheckoutSession = serde_json::from_str(r#"{"id":"sess_abc"}"#).unwrap();
        let b: CheckoutSession = serde_json::from_str(r#"{"sessionId":"sess_abc"}"#).unwrap();
        let c: CheckoutSession =
            serde_json::from_str(r#"{"session_id":"sess_abc","url":"https://x.test/p"}"#).unwrap();

        assert_eq!(a.id, "sess_abc");
        assert_eq!(b.id, "sess_abc");
        assert_eq!(c.url.as_deref(), Some("https://x.test/p"));
    }

    #[test]
    fn session_with_several_id_fields_takes_id() {
        let session: CheckoutSession = serde_json::from_value(serde_json::json!({
            "object": "checkout.session",
            "sessionId": "cs_camel",
            "id": "cs_1",
            "session_id": "cs_snake",
            "url": "https://checkout.stripe.com/c/pay/cs_1"
        }))
        .unwrap();

        assert_eq!(session.id, "cs_1");
        assert_eq!(session.url.as_deref(), Some("https://checkout.stripe.com/c/pay/cs_1"));
    }

    #[test]
    fn session_without_any_id_is_rejected() {
        let err = serde_json::from_str::<CheckoutSession>(r#"{"url":"https://x.test/p"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }
}
