// --- File: crates/danceflow_stripe/src/lib.rs ---

pub mod error;
pub mod payment;
pub mod provider;

pub use error::PaymentError;
pub use payment::{CreatePaymentIntentRequest, PaymentClient};
pub use provider::{
    CheckoutProvider, CheckoutSession, ProviderLoader, StripeCheckoutLoader, StripeHostedCheckout,
};
