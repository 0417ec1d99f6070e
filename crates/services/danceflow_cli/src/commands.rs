// --- File: crates/services/danceflow_cli/src/commands.rs ---
//! Command bodies, written against the service traits so tests can swap in
//! doubles.

use anyhow::Context;
use danceflow_common::{
    CalendarService, ClassDetails, Currency, DanceSchool, DanceflowError, PaymentResult,
    PaymentService, UnsupportedCurrency,
};
use danceflow_config::StripeConfig;
use danceflow_firebase::FirestoreClient;
use danceflow_ui::{Button, ButtonType};
use serde_json::Value;

/// Adds a class and returns the backend's response.
pub async fn add_class<S>(service: &S, details: &ClassDetails) -> anyhow::Result<Value>
where
    S: CalendarService + ?Sized,
{
    service
        .add_class_to_calendar(details)
        .await
        .with_context(|| format!("adding '{}' to the calendar", details.title))
}

/// Runs one payment attempt and renders the result as JSON.
///
/// Returns the JSON together with `success`.
pub async fn pay<S>(
    service: &S,
    amount: i64,
    currency: Option<Currency>,
) -> anyhow::Result<(String, bool)>
where
    S: PaymentService + ?Sized,
{
    let result: PaymentResult = service.process_payment(amount, currency).await;
    let json = serde_json::to_string_pretty(&result)?;
    Ok((json, result.success))
}

/// Currency from the command line, else the configured default, else
/// `None` (which the payment client treats as USD).
pub fn resolve_currency(
    requested: Option<Currency>,
    stripe: Option<&StripeConfig>,
) -> Result<Option<Currency>, UnsupportedCurrency> {
    if requested.is_some() {
        return Ok(requested);
    }
    stripe
        .and_then(|s| s.default_currency.as_deref())
        .map(str::parse::<Currency>)
        .transpose()
}

/// Reads a school profile as JSON. A missing profile is a `NotFoundError`.
pub async fn show_school(db: &FirestoreClient, id: &str) -> anyhow::Result<Value> {
    let school = db
        .get_dance_school(id)
        .await
        .with_context(|| format!("reading dance school {}", id))?;
    let school = require_school(id, school)?;
    Ok(serde_json::to_value(school)?)
}

fn require_school(id: &str, school: Option<DanceSchool>) -> Result<DanceSchool, DanceflowError> {
    school.ok_or_else(|| DanceflowError::NotFoundError(format!("dance school {}", id)))
}

pub fn render_button(
    text: &str,
    variant: Option<&str>,
    full_width: bool,
    button_type: ButtonType,
) -> String {
    let mut button = Button::new(text)
        .full_width(full_width)
        .button_type(button_type);
    if let Some(variant) = variant {
        button = button.variant(variant);
    }
    button.render()
}
