//! CLI identity helpers. Sessions live only for the duration of a command.

use skincheck_core::auth::{
    resolve_optional_firebase_config, AuthResult, FirebaseAuthClient, MemorySessionStore,
};
use skincheck_core::config::AppConfig;

use crate::error::CliError;

pub type IdentityClient = FirebaseAuthClient<MemorySessionStore>;

/// Build the Firebase client for a resolved config.
///
/// `Ok(None)` when no API key is configured.
pub fn identity_client(config: &AppConfig) -> Result<Option<IdentityClient>, CliError> {
    let Some(api_key) = resolve_optional_firebase_config(config.firebase_api_key()) else {
        return Ok(None);
    };
    let identity_url = config.identity_url()?;
    let secure_token_url = config.secure_token_url()?;
    let client = build_client(&identity_url, &secure_token_url, &api_key)
        .map_err(|error| CliError::Auth(error.to_string()))?;
    tracing::debug!("Using identity endpoint {}", identity_url);
    Ok(Some(client))
}

/// Like [`identity_client`], but a missing API key is an error.
pub fn require_identity_client(config: &AppConfig) -> Result<IdentityClient, CliError> {
    identity_client(config)?.ok_or(CliError::AuthNotConfigured)
}

fn build_client(
    identity_url: &str,
    secure_token_url: &str,
    api_key: &str,
) -> AuthResult<IdentityClient> {
    FirebaseAuthClient::with_endpoints(
        identity_url,
        secure_token_url,
        api_key,
        MemorySessionStore::default(),
    )
}
