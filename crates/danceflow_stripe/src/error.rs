use danceflow_common::{
    external_service_error, validation_error, DanceflowError, ErrorKind, HasErrorKind,
};
use thiserror::Error;

/// Payment-specific error types.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The hosted checkout client could not be initialized
    #[error("Payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Error occurred during the request to the payment-intent route
    #[error("Payment request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The payment-intent route answered with a non-success status
    #[error("Payment backend returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// The payment-intent route answered with an unusable body
    #[error("Failed to parse checkout session: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The hosted checkout refused the session
    #[error("Checkout redirect failed: {0}")]
    RedirectError(String),

    #[error("Invalid payment amount: {0} (must be a positive number of minor units)")]
    InvalidAmount(i64),
}

impl HasErrorKind for PaymentError {
    fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            PaymentError::RequestError(_) => ErrorKind::Network,
            PaymentError::ApiError { .. } => ErrorKind::HttpStatus,
            PaymentError::ParseError(_) => ErrorKind::Decode,
            PaymentError::RedirectError(_) => ErrorKind::Redirect,
            PaymentError::InvalidAmount(_) => ErrorKind::Validation,
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            PaymentError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Convert PaymentError to DanceflowError
impl From<PaymentError> for DanceflowError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InvalidAmount(amount) => {
                validation_error(format!("Invalid payment amount: {}", amount))
            }
            other => external_service_error("Stripe checkout", &other),
        }
    }
}
