// --- File: crates/services/danceflow_cli/src/service_factory.rs ---
//! Builds the adapters the commands run against.
//!
//! Each integration is only constructed when its `use_*` flag is set; a
//! disabled integration is reported as a configuration error.

use danceflow_common::{config_error, BackendClient, DanceflowError};
use danceflow_config::AppConfig;
use danceflow_firebase::FirebaseServices;
use danceflow_gcal::CalendarClient;
use danceflow_stripe::PaymentClient;
use tracing::info;

/// Runtime check for an integration: the flag must be on and, where the
/// integration needs one, its section must be present.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

pub struct ServiceFactory<'a> {
    config: &'a AppConfig,
    backend: BackendClient,
}

impl<'a> ServiceFactory<'a> {
    pub fn new(config: &'a AppConfig) -> Result<Self, DanceflowError> {
        let backend = BackendClient::new(&config.backend)?;
        Ok(Self { config, backend })
    }

    pub fn calendar(&self) -> Result<CalendarClient, DanceflowError> {
        // The calendar adapter only needs the backend section.
        if !self.config.use_gcal {
            return Err(config_error("calendar integration is disabled (use_gcal = false)"));
        }
        info!("Initializing calendar adapter");
        Ok(CalendarClient::new(self.backend.clone(), &self.config.backend))
    }

    pub fn payment(&self) -> Result<PaymentClient, DanceflowError> {
        let stripe = self.config.stripe.as_ref();
        if !is_feature_enabled(self.config.use_stripe, stripe) {
            return Err(config_error(
                "payment integration is disabled (use_stripe = false or no [stripe] section)",
            ));
        }
        let stripe = stripe.ok_or_else(|| config_error("missing [stripe] section"))?;
        info!("Initializing payment adapter");
        Ok(PaymentClient::new(self.backend.clone(), &self.config.backend, stripe))
    }

    pub fn firebase(&self) -> Result<FirebaseServices, DanceflowError> {
        let firebase = self.config.firebase.as_ref();
        if !is_feature_enabled(self.config.use_firebase, firebase) {
            return Err(config_error(
                "firebase integration is disabled (use_firebase = false or no [firebase] section)",
            ));
        }
        let firebase = firebase.ok_or_else(|| config_error("missing [firebase] section"))?;
        Ok(FirebaseServices::initialize(firebase.clone())?)
    }
}
