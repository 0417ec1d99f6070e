use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification shared by every adapter error.
///
/// Callers branch on the kind instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request never produced a response (connect, TLS, timeout, body read)
    Network,
    /// The remote side answered with a non-success status
    HttpStatus,
    /// The response body could not be decoded
    Decode,
    /// Missing or invalid configuration
    Config,
    /// The hosted provider handle could not be initialized
    ProviderUnavailable,
    /// The hosted checkout redirect was refused
    Redirect,
    /// The caller's input was rejected before any request was made
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Decode => "decode",
            ErrorKind::Config => "config",
            ErrorKind::ProviderUnavailable => "provider_unavailable",
            ErrorKind::Redirect => "redirect",
            ErrorKind::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every adapter error so both adapters report failures
/// with the same vocabulary.
pub trait HasErrorKind {
    fn kind(&self) -> ErrorKind;

    /// The HTTP status the remote side answered with, if any.
    fn status(&self) -> Option<u16> {
        None
    }

    /// Network failures and 5xx answers may succeed when repeated.
    fn is_transient(&self) -> bool {
        match self.kind() {
            ErrorKind::Network => true,
            ErrorKind::HttpStatus => self.status().is_some_and(|s| s >= 500),
            _ => false,
        }
    }
}

/// The base error type for all Danceflow errors.
///
/// Each integration crate has its own error enum and implements
/// `From<SpecificError> for DanceflowError`.
#[derive(Error, Debug)]
pub enum DanceflowError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        kind: ErrorKind,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFoundError(String),
}

impl HasErrorKind for DanceflowError {
    fn kind(&self) -> ErrorKind {
        match self {
            DanceflowError::HttpError(_) => ErrorKind::Network,
            DanceflowError::ParseError(_) => ErrorKind::Decode,
            DanceflowError::ConfigError(_) => ErrorKind::Config,
            DanceflowError::AuthError(_) => ErrorKind::HttpStatus,
            DanceflowError::ValidationError(_) => ErrorKind::Validation,
            DanceflowError::ExternalServiceError { kind, .. } => *kind,
            DanceflowError::NotFoundError(_) => ErrorKind::HttpStatus,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for DanceflowError {
    fn from(err: reqwest::Error) -> Self {
        DanceflowError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for DanceflowError {
    fn from(err: serde_json::Error) -> Self {
        DanceflowError::ParseError(err.to_string())
    }
}

impl From<danceflow_config::ConfigError> for DanceflowError {
    fn from(err: danceflow_config::ConfigError) -> Self {
        DanceflowError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> DanceflowError {
    DanceflowError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> DanceflowError {
    DanceflowError::ValidationError(message.to_string())
}

/// Wraps an integration error, keeping its kind tag.
pub fn external_service_error<E>(service_name: &str, err: &E) -> DanceflowError
where
    E: HasErrorKind + fmt::Display,
{
    DanceflowError::ExternalServiceError {
        service_name: service_name.to_string(),
        kind: err.kind(),
        message: err.to_string(),
    }
}
