// --- File: crates/danceflow_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error taxonomy shared by all adapters
pub mod http; // Backend HTTP client
pub mod logging; // Logging setup
pub mod models; // Domain types
pub mod services; // Service traits

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, validation_error, DanceflowError, ErrorKind,
    HasErrorKind,
};

pub use http::{create_client, BackendClient};

pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use models::{
    CheckoutRedirect, ClassDetails, Currency, DanceSchool, EventTime, PaymentFailure,
    PaymentResult, SocialMedia, UnsupportedCurrency,
};

pub use services::{BoxFuture, CalendarService, InfallibleFuture, PaymentService};
