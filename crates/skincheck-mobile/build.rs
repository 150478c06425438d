use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

const BOOTSTRAP_ENV_VARS: [&str; 5] = [
    "SKINCHECK_FIREBASE_API_KEY",
    "SKINCHECK_IDENTITY_URL",
    "SKINCHECK_SECURE_TOKEN_URL",
    "SKINCHECK_PROMOTION_RECIPIENTS",
    "SKINCHECK_OUTBOX_DIR",
];

/// Mirrors `skincheck_core::config::AppConfig`.
#[derive(Debug, Default, Serialize)]
struct MobileBootstrapConfig {
    firebase_api_key: Option<String>,
    identity_base_url: Option<String>,
    secure_token_base_url: Option<String>,
    promotion_recipients: Vec<String>,
    outbox_dir: Option<String>,
}

fn main() {
    for name in BOOTSTRAP_ENV_VARS {
        println!("cargo:rerun-if-env-changed={name}");
    }

    if let Err(error) = write_mobile_bootstrap_config() {
        println!("cargo:warning=failed to generate mobile bootstrap config: {error}");
    }
}

fn write_mobile_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = MobileBootstrapConfig {
        firebase_api_key: env_var_trimmed("SKINCHECK_FIREBASE_API_KEY"),
        identity_base_url: env_var_trimmed("SKINCHECK_IDENTITY_URL"),
        secure_token_base_url: env_var_trimmed("SKINCHECK_SECURE_TOKEN_URL"),
        promotion_recipients: env_var_trimmed("SKINCHECK_PROMOTION_RECIPIENTS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        outbox_dir: env_var_trimmed("SKINCHECK_OUTBOX_DIR"),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("mobile-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let workspace_root = manifest_dir.join("..").join("..");

    // .env.client holds client-safe values only
    let client_env = workspace_root.join(".env.client");
    let legacy_env = workspace_root.join(".env");

    if client_env.exists() {
        let _ = dotenvy::from_path(client_env);
    } else if legacy_env.exists() {
        let _ = dotenvy::from_path(legacy_env);
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
