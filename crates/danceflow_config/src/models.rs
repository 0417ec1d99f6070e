// --- File: crates/danceflow_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// OAuth scope for read/write access to Google Calendar.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Marker value replaced from the environment after loading.
pub const SECRET_MARKER: &str = "secret_from_env";

// --- Backend Config ---
// The booking backend that proxies calendar and checkout requests.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String, // Mandatory, e.g. DANCEFLOW__BACKEND__BASE_URL
    #[serde(default = "default_calendar_path")]
    pub calendar_path: String,
    #[serde(default = "default_payment_intent_path")]
    pub payment_intent_path: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_calendar_path() -> String {
    "/api/calendar".to_string()
}

fn default_payment_intent_path() -> String {
    "/api/create-payment-intent".to_string()
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            calendar_path: default_calendar_path(),
            payment_intent_path: default_payment_intent_path(),
            timeout_secs: None,
        }
    }
}

// --- Firebase Config ---
// Connection parameters for the hosted app. api_key is normally "secret_from_env".
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    pub api_key: String, // Loaded via DANCEFLOW_SECRET_FIREBASE_API_KEY or FIREBASE_API_KEY
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    #[serde(default)]
    pub measurement_id: Option<String>,
    // Emulator or proxy overrides for the hosted endpoints
    #[serde(default)]
    pub auth_emulator_url: Option<String>,
    #[serde(default)]
    pub firestore_emulator_url: Option<String>,
    #[serde(default)]
    pub storage_emulator_url: Option<String>,
}

// --- Stripe Config ---
// Only the publishable key lives here; secret keys stay on the backend.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    pub publishable_key: String, // Loaded via DANCEFLOW_SECRET_STRIPE_PUBLISHABLE_KEY
    #[serde(default = "default_checkout_base_url")]
    pub checkout_base_url: String,
    #[serde(default)]
    pub default_currency: Option<String>,
}

fn default_checkout_base_url() -> String {
    "https://checkout.stripe.com/c/pay".to_string()
}

impl StripeConfig {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            checkout_base_url: default_checkout_base_url(),
            default_currency: None,
        }
    }
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    #[serde(default = "default_calendar_scope")]
    pub scope: String,
}

fn default_calendar_scope() -> String {
    CALENDAR_SCOPE.to_string()
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            scope: default_calendar_scope(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for a daily rolling log file. Console only when unset.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "danceflow.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Backend config is mandatory
    pub backend: BackendConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_firebase: bool,
    #[serde(default)]
    pub use_stripe: bool,
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// A config with only the backend set and every integration disabled.
    pub fn with_backend(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig::new(base_url),
            use_firebase: false,
            use_stripe: false,
            use_gcal: false,
            firebase: None,
            stripe: None,
            gcal: None,
            logging: LoggingConfig::default(),
        }
    }
}
