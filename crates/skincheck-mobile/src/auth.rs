//! Firebase identity client for the mobile shell.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use skincheck_core::auth::{
    resolve_optional_firebase_config, AuthError, AuthResult, FirebaseAuthClient,
    MemorySessionStore,
};
use skincheck_core::config::AppConfig;

/// The session lives as long as the app process.
pub type MobileIdentity = FirebaseAuthClient<MemorySessionStore>;

/// `Ok(None)` when this build carries no Firebase API key.
pub fn identity_client(config: &AppConfig) -> AuthResult<Option<MobileIdentity>> {
    let Some(api_key) = resolve_optional_firebase_config(config.firebase_api_key()) else {
        return Ok(None);
    };
    let identity_url = config
        .identity_url()
        .map_err(|_| AuthError::InvalidConfiguration("invalid identity endpoint"))?;
    let secure_token_url = config
        .secure_token_url()
        .map_err(|_| AuthError::InvalidConfiguration("invalid secure token endpoint"))?;

    tracing::debug!("Using identity endpoint {}", identity_url);
    FirebaseAuthClient::with_endpoints(
        identity_url,
        secure_token_url,
        api_key,
        MemorySessionStore::default(),
    )
    .map(Some)
}
