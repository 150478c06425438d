//! Application configuration shared by the CLI and mobile shells.
//!
//! Values come from build-time bootstrap JSON, CLI profiles or the
//! environment. Only public client values belong here; the Firebase web API
//! key is not a secret.

use serde::{Deserialize, Serialize};

use crate::auth::{normalize_endpoint, DEFAULT_IDENTITY_URL, DEFAULT_SECURE_TOKEN_URL};
use crate::util::{is_http_url, normalize_text_option, split_list};
use crate::validation::is_valid_email;
use crate::{Error, Result};

pub const DEFAULT_PROMOTION_RECIPIENT: &str = "products@skincheck.app";
pub const DEFAULT_OUTBOX_DIR: &str = "outbox";

pub const ENV_FIREBASE_API_KEY: &str = "SKINCHECK_FIREBASE_API_KEY";
pub const ENV_IDENTITY_URL: &str = "SKINCHECK_IDENTITY_URL";
pub const ENV_SECURE_TOKEN_URL: &str = "SKINCHECK_SECURE_TOKEN_URL";
pub const ENV_PROMOTION_RECIPIENTS: &str = "SKINCHECK_PROMOTION_RECIPIENTS";
pub const ENV_OUTBOX_DIR: &str = "SKINCHECK_OUTBOX_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub firebase_api_key: Option<String>,
    #[serde(default)]
    pub identity_base_url: Option<String>,
    #[serde(default)]
    pub secure_token_base_url: Option<String>,
    #[serde(default)]
    pub promotion_recipients: Vec<String>,
    #[serde(default)]
    pub outbox_dir: Option<String>,
}

impl AppConfig {
    /// Read every `SKINCHECK_*` variable; unset or blank ones stay empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            firebase_api_key: normalize_text_option(lookup(ENV_FIREBASE_API_KEY)),
            identity_base_url: normalize_text_option(lookup(ENV_IDENTITY_URL)),
            secure_token_base_url: normalize_text_option(lookup(ENV_SECURE_TOKEN_URL)),
            promotion_recipients: lookup(ENV_PROMOTION_RECIPIENTS)
                .map(|value| split_list(&value))
                .unwrap_or_default(),
            outbox_dir: normalize_text_option(lookup(ENV_OUTBOX_DIR)),
        }
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            firebase_api_key: overrides.firebase_api_key.or(self.firebase_api_key),
            identity_base_url: overrides.identity_base_url.or(self.identity_base_url),
            secure_token_base_url: overrides
                .secure_token_base_url
                .or(self.secure_token_base_url),
            promotion_recipients: if overrides.promotion_recipients.is_empty() {
                self.promotion_recipients
            } else {
                overrides.promotion_recipients
            },
            outbox_dir: overrides.outbox_dir.or(self.outbox_dir),
        }
    }

    pub fn firebase_api_key(&self) -> Option<String> {
        normalize_text_option(self.firebase_api_key.clone())
    }

    pub fn identity_url(&self) -> Result<String> {
        resolve_endpoint(self.identity_base_url.clone(), DEFAULT_IDENTITY_URL)
    }

    pub fn secure_token_url(&self) -> Result<String> {
        resolve_endpoint(self.secure_token_base_url.clone(), DEFAULT_SECURE_TOKEN_URL)
    }

    /// Configured recipients, or the default product team address.
    pub fn recipients(&self) -> Vec<String> {
        let recipients: Vec<String> = self
            .promotion_recipients
            .iter()
            .map(|recipient| recipient.trim().to_string())
            .filter(|recipient| !recipient.is_empty())
            .collect();
        if recipients.is_empty() {
            vec![DEFAULT_PROMOTION_RECIPIENT.to_string()]
        } else {
            recipients
        }
    }

    pub fn outbox_dir(&self) -> String {
        normalize_text_option(self.outbox_dir.clone())
            .unwrap_or_else(|| DEFAULT_OUTBOX_DIR.to_string())
    }

    /// Reject malformed endpoints and recipients early.
    pub fn validate(&self) -> Result<()> {
        self.identity_url()?;
        self.secure_token_url()?;
        if let Some(invalid) = self
            .recipients()
            .into_iter()
            .find(|recipient| !is_valid_email(recipient))
        {
            return Err(Error::Config(format!(
                "promotion recipient is not a valid email address: {invalid}"
            )));
        }
        Ok(())
    }
}

/// Parse an [`AppConfig`] from JSON, rejecting unknown fields.
pub fn parse_app_config(payload: &str) -> Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(payload)
        .map_err(|error| Error::Config(format!("invalid app config JSON: {error}")))?;
    config.validate()?;
    Ok(config)
}

fn resolve_endpoint(value: Option<String>, default: &str) -> Result<String> {
    let Some(value) = normalize_text_option(value) else {
        return Ok(default.to_string());
    };
    if !is_http_url(&value) {
        return Err(Error::Config(format!(
            "endpoint must start with http:// or https://: {value}"
        )));
    }
    normalize_endpoint(&value).map_err(|error| Error::Config(error.to_string()))
}
