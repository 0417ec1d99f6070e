//! Domain types shared by the adapters and the front end.
//!
//! Wire names are camelCase to match the backend and the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{ErrorKind, HasErrorKind};

// --- Dance school ---

/// A dance school as stored in the document store.
///
/// Lifecycle (create/update/delete) belongs to the backend; this type only
/// fixes the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanceSchool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dance_styles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Derived by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

// --- Calendar ---

/// Start or end of a class: either a timestamp or text passed through as is.
///
/// A `DateTime` serializes as RFC 3339 in UTC (`...Z`). Deserializing always
/// yields `Text`, so an incoming offset like `+02:00` is sent on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Text(String),
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(EventTime::Text)
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(value: DateTime<Utc>) -> Self {
        EventTime::DateTime(value)
    }
}

impl From<String> for EventTime {
    fn from(value: String) -> Self {
        EventTime::Text(value)
    }
}

impl From<&str> for EventTime {
    fn from(value: &str) -> Self {
        EventTime::Text(value.to_string())
    }
}

/// A class to put on the school calendar. Built by the caller, serialized
/// once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetails {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: EventTime,
    pub end_time: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
}

impl ClassDetails {
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<EventTime>,
        end_time: impl Into<EventTime>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_time: start_time.into(),
            end_time: end_time.into(),
            location: None,
            attendees: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = Some(attendees.into_iter().map(Into::into).collect());
        self
    }
}

// --- Payment ---

/// Currencies accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Try,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Try, Currency::Gbp];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Try => "TRY",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported currency: {0} (expected one of USD, EUR, TRY, GBP)")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedCurrency(s.to_string()))
    }
}

/// Where the caller has to send the user to complete a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    pub session_id: String,
    pub url: String,
}

/// Why a payment attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl PaymentFailure {
    pub fn from_error<E: HasErrorKind + fmt::Display>(err: &E) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one payment attempt, returned instead of an error.
///
/// `success` only means the user was handed to the hosted checkout; the
/// payment itself completes after the redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PaymentFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<CheckoutRedirect>,
}

impl PaymentResult {
    pub fn succeeded(redirect: CheckoutRedirect) -> Self {
        Self {
            success: true,
            message: None,
            error: None,
            redirect: Some(redirect),
        }
    }

    pub fn failed(failure: PaymentFailure) -> Self {
        Self {
            success: false,
            message: Some(failure.message.clone()),
            error: Some(failure),
            redirect: None,
        }
    }
}

impl<E: HasErrorKind + fmt::Display> From<Result<CheckoutRedirect, E>> for PaymentResult {
    fn from(result: Result<CheckoutRedirect, E>) -> Self {
        match result {
            Ok(redirect) => PaymentResult::succeeded(redirect),
            Err(err) => PaymentResult::failed(PaymentFailure::from_error(&err)),
        }
    }
}
