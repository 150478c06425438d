//! Mobile configuration baked in at build time, with runtime overrides.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use skincheck_core::config::{parse_app_config, AppConfig};

const BUNDLED_BOOTSTRAP_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/mobile-bootstrap.json"));

/// Parse the generated bootstrap JSON. A malformed bundle falls back to the
/// defaults so the app can still start without sign-in.
pub fn load_bootstrap_config() -> AppConfig {
    parse_app_config(BUNDLED_BOOTSTRAP_JSON).unwrap_or_else(|error| {
        tracing::error!("Failed to parse mobile bootstrap config: {}", error);
        AppConfig::default()
    })
}

/// Bundled values with any `SKINCHECK_*` variable set at runtime on top.
pub fn resolve_app_config() -> AppConfig {
    let resolved = load_bootstrap_config().merged_with(AppConfig::from_env());
    if let Err(error) = resolved.validate() {
        tracing::warn!("Ignoring runtime config overrides: {}", error);
        return load_bootstrap_config();
    }
    resolved
}
