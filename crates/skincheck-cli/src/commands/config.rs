use serde::Serialize;
use skincheck_core::config::AppConfig;

use crate::cli::ConfigCommands;
use crate::commands::common::print_json;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            firebase_api_key,
            identity_url,
            secure_token_url,
            recipients,
            outbox_dir,
            no_activate,
        } => {
            let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            let update = CliProfile {
                firebase_api_key,
                identity_base_url: identity_url,
                secure_token_base_url: secure_token_url,
                promotion_recipients: recipients,
                outbox_dir,
            };
            apply_profile_update(&mut config, &profile_name, update, !no_activate)?;

            let path = config.save().map_err(CliError::Config)?;
            println!(
                "Profile '{}' initialized at {}",
                profile_name,
                path.display()
            );
            if config
                .profile(&profile_name)
                .and_then(|profile| normalize_text_option(profile.firebase_api_key.clone()))
                .is_none()
            {
                println!("Profile '{profile_name}' is missing: firebase_api_key");
            }
            Ok(())
        }
        ConfigCommands::Show { profile, json } => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let (profile_name, app_config) =
                config.resolve_app_config(profile.as_deref().or(global_profile));
            let summary = ConfigSummary::new(&profile_name, &app_config)?;
            if json {
                return print_json(&summary);
            }
            for line in summary.lines() {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Merge `update` into the named profile; values left unset keep the
/// stored ones.
pub fn apply_profile_update(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    update: CliProfile,
    activate: bool,
) -> Result<(), CliError> {
    let profile = config.profile_mut_or_default(profile_name);
    let merged = profile.to_app_config().merged_with(update.to_app_config());
    merged.validate()?;

    *profile = CliProfile {
        firebase_api_key: merged.firebase_api_key,
        identity_base_url: merged.identity_base_url,
        secure_token_base_url: merged.secure_token_base_url,
        promotion_recipients: merged.promotion_recipients,
        outbox_dir: merged.outbox_dir,
    };
    if activate {
        config.active_profile = Some(profile_name.to_string());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub profile: String,
    pub firebase_api_key: Option<String>,
    pub identity_url: String,
    pub secure_token_url: String,
    pub promotion_recipients: Vec<String>,
    pub outbox_dir: String,
}

impl ConfigSummary {
    pub fn new(profile_name: &str, config: &AppConfig) -> Result<Self, CliError> {
        Ok(Self {
            profile: profile_name.to_string(),
            firebase_api_key: config.firebase_api_key().map(|key| mask_key(&key)),
            identity_url: config.identity_url()?,
            secure_token_url: config.secure_token_url()?,
            promotion_recipients: config.recipients(),
            outbox_dir: config.outbox_dir(),
        })
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("profile: {}", self.profile),
            format!(
                "firebase_api_key: {}",
                self.firebase_api_key.as_deref().unwrap_or("(not set)")
            ),
            format!("identity_url: {}", self.identity_url),
            format!("secure_token_url: {}", self.secure_token_url),
            format!(
                "promotion_recipients: {}",
                self.promotion_recipients.join(", ")
            ),
            format!("outbox_dir: {}", self.outbox_dir),
        ]
    }
}

/// Keep the first four characters of a key visible.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
