//! Environment variable names used by Danceflow.
//!
//! Plain settings are layered by the `config` crate from
//! `DANCEFLOW__SECTION__KEY`. Values written as `"secret_from_env"` are
//! resolved here from `DANCEFLOW_SECRET_SECTION_KEY`, falling back to the
//! provider's own naming (`FIREBASE_API_KEY`, `STRIPE_PUBLISHABLE_KEY`).

use std::env;

use serde_json::Value;
use tracing::warn;

use crate::models::SECRET_MARKER;

pub const CONFIG_PREFIX: &str = "DANCEFLOW";
pub const CONFIG_SEPARATOR: &str = "__";

const SECRET_PREFIX: &str = "DANCEFLOW_SECRET";

/// Candidate variable names for a marker at `path`, in lookup order.
///
/// `["stripe", "publishable_key"]` yields
/// `DANCEFLOW_SECRET_STRIPE_PUBLISHABLE_KEY` then `STRIPE_PUBLISHABLE_KEY`.
fn secret_var_names(path: &[String]) -> [String; 2] {
    let joined = path.join("_").to_uppercase();
    [format!("{}_{}", SECRET_PREFIX, joined), joined]
}

fn lookup_secret(path: &[String]) -> Option<String> {
    secret_var_names(path)
        .iter()
        .find_map(|name| env::var(name).ok())
}

/// Replace every `"secret_from_env"` string in `value` with the matching
/// environment variable.
///
/// Returns `true` if any value was replaced. Markers without a matching
/// variable are left in place and reported at WARN level.
pub fn inject_env_vars(value: &mut Value) -> bool {
    fn walk(path: &mut Vec<String>, node: &mut Value) -> bool {
        match node {
            Value::Object(map) => {
                let mut replaced = false;
                for (key, child) in map.iter_mut() {
                    path.push(key.clone());
                    replaced |= walk(path, child);
                    path.pop();
                }
                replaced
            }
            Value::Array(items) => {
                let mut replaced = false;
                for (i, child) in items.iter_mut().enumerate() {
                    path.push(i.to_string());
                    replaced |= walk(path, child);
                    path.pop();
                }
                replaced
            }
            Value::String(s) if s == SECRET_MARKER => match lookup_secret(path) {
                Some(secret) => {
                    *s = secret;
                    true
                }
                None => {
                    let [primary, fallback] = secret_var_names(path);
                    warn!(%primary, %fallback, "secret_from_env marker left unresolved");
                    false
                }
            },
            _ => false,
        }
    }

    walk(&mut Vec::new(), value)
}
