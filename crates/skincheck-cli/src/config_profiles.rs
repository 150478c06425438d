//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skincheck_core::config::AppConfig;
use skincheck_core::util::split_list;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const PROFILE_ENV: &str = "SKINCHECK_PROFILE";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
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

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skincheck")
        .join(CONFIG_FILE_NAME)
}

pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    skincheck_core::util::normalize_text_option(value)
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        self.resolve_profile_name_with_env(explicit, std::env::var(PROFILE_ENV).ok().as_deref())
    }

    fn resolve_profile_name_with_env(&self, explicit: Option<&str>, env: Option<&str>) -> String {
        normalize_profile_name(explicit)
            .or_else(|| normalize_profile_name(env))
            .or_else(|| normalize_profile_name(self.active_profile.as_deref()))
            .unwrap_or_else(|| "default".to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    /// Profile values with `SKINCHECK_*` environment variables layered on top.
    pub fn resolve_app_config(&self, explicit: Option<&str>) -> (String, AppConfig) {
        let profile_name = self.resolve_profile_name(explicit);
        let base = self
            .profile(&profile_name)
            .map(CliProfile::to_app_config)
            .unwrap_or_default();
        (profile_name, base.merged_with(AppConfig::from_env()))
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            firebase_api_key: normalize_text_option(self.firebase_api_key.clone()),
            identity_base_url: normalize_text_option(self.identity_base_url.clone()),
            secure_token_base_url: normalize_text_option(self.secure_token_base_url.clone()),
            promotion_recipients: self.promotion_recipients.clone(),
            outbox_dir: normalize_text_option(self.outbox_dir.clone()),
        }
    }

    fn normalize(&mut self) {
        self.firebase_api_key = normalize_text_option(self.firebase_api_key.clone());
        self.identity_base_url = normalize_text_option(self.identity_base_url.clone());
        self.secure_token_base_url = normalize_text_option(self.secure_token_base_url.clone());
        self.promotion_recipients = split_list(&self.promotion_recipients.join(","));
        self.outbox_dir = normalize_text_option(self.outbox_dir.clone());
    }
}
