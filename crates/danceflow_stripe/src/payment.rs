//! Payment adapter.
//!
//! A payment attempt is three steps: resolve the hosted checkout client,
//! ask the booking backend for a checkout session, hand the session to the
//! hosted checkout. The payment itself completes after the redirect, outside
//! this process.

use danceflow_common::{
    BackendClient, CheckoutRedirect, Currency, HasErrorKind, InfallibleFuture, PaymentResult,
    PaymentService,
};
use danceflow_config::{BackendConfig, StripeConfig};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::error::PaymentError;
use crate::provider::{CheckoutProvider, CheckoutSession, ProviderLoader, StripeCheckoutLoader};

/// Body sent to the payment-intent route.
#[derive(Debug, Serialize)]
pub struct CreatePaymentIntentRequest {
    /// Minor units, e.g. cents
    pub amount: i64,
    pub currency: Currency,
}

/// Starts hosted checkouts through the booking backend.
pub struct PaymentClient {
    backend: BackendClient,
    path: String,
    loader: Arc<dyn ProviderLoader>,
    provider: OnceCell<Arc<dyn CheckoutProvider>>,
}

impl PaymentClient {
    /// Uses the Stripe hosted checkout and the payment-intent route from
    /// the backend config.
    pub fn new(backend: BackendClient, backend_config: &BackendConfig, stripe: &StripeConfig) -> Self {
        Self::with_loader(
            backend,
            backend_config.payment_intent_path.clone(),
            Arc::new(StripeCheckoutLoader::new(stripe)),
        )
    }

    /// Uses an arbitrary provider loader.
    pub fn with_loader(
        backend: BackendClient,
        path: impl Into<String>,
        loader: Arc<dyn ProviderLoader>,
    ) -> Self {
        Self {
            backend,
            path: path.into(),
            loader,
            provider: OnceCell::new(),
        }
    }

    /// Resolves the checkout provider, loading it on first use.
    ///
    /// Concurrent first calls share one load. A failed load is not cached.
    async fn provider(&self) -> Result<Arc<dyn CheckoutProvider>, PaymentError> {
        self.provider
            .get_or_try_init(|| self.loader.load())
            .await
            .cloned()
    }

    /// Starts a checkout for `amount` minor units of `currency` (USD when
    /// `None`).
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount` is zero or negative
    /// * `ProviderUnavailable` - the hosted checkout could not be loaded
    /// * `RequestError` / `ApiError` / `ParseError` - the payment-intent
    ///   route failed
    /// * `RedirectError` - the hosted checkout refused the session
    pub async fn try_process_payment(
        &self,
        amount: i64,
        currency: Option<Currency>,
    ) -> Result<CheckoutRedirect, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(amount));
        }
        let currency = currency.unwrap_or_default();

        let provider = self.provider().await?;
        let session = self.create_session(amount, currency).await?;
        let redirect = provider.redirect_to_checkout(&session).await?;

        info!(
            session_id = %redirect.session_id,
            amount,
            currency = %currency,
            "Redirecting to hosted checkout"
        );
        Ok(redirect)
    }

    /// Like [`try_process_payment`](Self::try_process_payment), but never
    /// fails: errors are logged and returned inside the result.
    pub async fn process_payment(&self, amount: i64, currency: Option<Currency>) -> PaymentResult {
        let result = self.try_process_payment(amount, currency).await;
        if let Err(err) = &result {
            error!(kind = %err.kind(), status = ?err.status(), "Payment error: {}", err);
        }
        PaymentResult::from(result)
    }

    async fn create_session(
        &self,
        amount: i64,
        currency: Currency,
    ) -> Result<CheckoutSession, PaymentError> {
        let request = CreatePaymentIntentRequest { amount, currency };
        let response = self.backend.post_json(&self.path, &request).await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(PaymentError::ApiError {
                status_code: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pulls `error` / `error.message` / `message` out of an error body, or
/// falls back to the raw text.
fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return text.into_owned();
    };

    let candidate = value
        .get("error")
        .and_then(|e| e.get("message").or(Some(e)))
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str());

    candidate.map(str::to_string).unwrap_or_else(|| text.into_owned())
}

impl PaymentService for PaymentClient {
    fn process_payment(
        &self,
        amount: i64,
        currency: Option<Currency>,
    ) -> InfallibleFuture<'_, PaymentResult> {
        Box::pin(PaymentClient::process_payment(self, amount, currency))
    }
}
