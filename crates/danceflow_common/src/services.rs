//! Service abstractions for the hosted integrations.
//!
//! Front ends depend on these traits rather than on the concrete adapters so
//! they can be handed a test double.

use std::future::Future;
use std::pin::Pin;

use crate::error::HasErrorKind;
use crate::models::{ClassDetails, Currency, PaymentResult};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Type alias for a boxed future that cannot fail
pub type InfallibleFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Puts classes on the school calendar.
pub trait CalendarService: Send + Sync {
    type Error: std::error::Error + HasErrorKind + Send + Sync + 'static;

    /// Create a calendar entry for `details`. Returns the backend's response
    /// body untouched.
    fn add_class_to_calendar<'a>(
        &'a self,
        details: &'a ClassDetails,
    ) -> BoxFuture<'a, serde_json::Value, Self::Error>;
}

/// Starts hosted checkouts.
pub trait PaymentService: Send + Sync {
    /// Start a checkout for `amount` minor units. `None` means USD.
    ///
    /// Never fails; failures are reported inside the `PaymentResult`.
    fn process_payment(
        &self,
        amount: i64,
        currency: Option<Currency>,
    ) -> InfallibleFuture<'_, PaymentResult>;
}
