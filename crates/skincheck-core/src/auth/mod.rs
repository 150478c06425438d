//! Identity collaborator and its Firebase Identity Toolkit REST client.

use std::fmt;
use std::sync::{Arc, Mutex};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{normalize_text_option, unix_timestamp_now};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

const EXPIRY_SKEW_SECONDS: i64 = 60;
const IDP_REQUEST_URI: &str = "http://localhost";
const MISSING_EMAIL_MESSAGE: &str = "An email address must be provided.";
const MISSING_PASSWORD_MESSAGE: &str = "A password must be provided.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Token handed over by a federated login provider (Google Sign-In).
#[derive(Clone, PartialEq, Eq)]
pub struct FederatedCredential {
    pub provider_id: String,
    pub id_token: String,
    pub access_token: Option<String>,
}

impl FederatedCredential {
    pub fn google(id_token: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            provider_id: GOOGLE_PROVIDER_ID.to_string(),
            id_token: id_token.into(),
            access_token,
        }
    }

    /// `postBody` form expected by `accounts:signInWithIdp`.
    #[must_use]
    pub fn post_body(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("id_token", &self.id_token);
        if let Some(access_token) = &self.access_token {
            serializer.append_pair("access_token", access_token);
        }
        serializer.append_pair("providerId", &self.provider_id);
        serializer.finish()
    }
}

impl fmt::Debug for FederatedCredential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FederatedCredential")
            .field("provider_id", &self.provider_id)
            .field("id_token", &"[REDACTED]")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Identity errors. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Sign-in is not configured for this build.")]
    NotConfigured,
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Network error (such as timeout, interrupted connection or unreachable host) has occurred.")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// External identity provider consumed by the sign-in, registration and
/// password reset flows.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn register(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn send_verification_email(&self, session: &AuthSession) -> AuthResult<()>;
    async fn reload_and_check_verified(&self, session: &AuthSession) -> AuthResult<bool>;
    async fn send_password_reset(&self, email: &str) -> AuthResult<()>;
    async fn federated_sign_in(&self, credential: &FederatedCredential)
        -> AuthResult<AuthSession>;
}

pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-lifetime session storage. Nothing is written to disk.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<AuthSession>>>,
}

impl MemorySessionStore {
    fn slot(&self) -> AuthResult<std::sync::MutexGuard<'_, Option<AuthSession>>> {
        self.session
            .lock()
            .map_err(|_| AuthError::SecureStorage("session store lock poisoned".to_string()))
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        Ok(self.slot()?.clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[derive(Clone)]
pub struct FirebaseAuthClient<S: SessionPersistence = MemorySessionStore> {
    identity_url: String,
    secure_token_url: String,
    api_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> FirebaseAuthClient<S> {
    /// Client for the public Google endpoints.
    pub fn new(api_key: impl Into<String>, store: S) -> AuthResult<Self> {
        Self::with_endpoints(
            DEFAULT_IDENTITY_URL,
            DEFAULT_SECURE_TOKEN_URL,
            api_key,
            store,
        )
    }

    /// Client for explicit endpoints (e.g. the Auth emulator).
    pub fn with_endpoints(
        identity_url: impl AsRef<str>,
        secure_token_url: impl AsRef<str>,
        api_key: impl Into<String>,
        store: S,
    ) -> AuthResult<Self> {
        let identity_url = normalize_endpoint(identity_url.as_ref())?;
        let secure_token_url = normalize_endpoint(secure_token_url.as_ref())?;
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Firebase API key must not be empty",
            ));
        }

        Ok(Self {
            identity_url,
            secure_token_url,
            api_key,
            client: Client::builder().build()?,
            store,
        })
    }

    pub async fn refresh_session(&self, session: &AuthSession) -> AuthResult<AuthSession> {
        if session.refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }

        let payload = serde_json::json!({
            "grant_type": "refresh_token",
            "refresh_token": session.refresh_token,
        });
        let response: SecureTokenResponse = self
            .post(&format!("{}/token", self.secure_token_url), &payload)
            .await?;
        let refreshed = AuthSession {
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: expires_at_from(&response.expires_in)?,
            user: AuthUser {
                id: response.user_id,
                ..session.user.clone()
            },
        };

        self.store.save_session(&refreshed)?;
        Ok(refreshed)
    }

    /// Firebase has no server-side logout; forgetting the tokens is enough.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.store.clear_session()
    }

    async fn post<T: DeserializeOwned>(&self, url: &str, payload: &serde_json::Value) -> AuthResult<T> {
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<T>().await?)
    }

    async fn account_request<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> AuthResult<T> {
        self.post(&format!("{}/accounts:{method}", self.identity_url), payload)
            .await
    }

    async fn token_request(&self, method: &str, payload: &serde_json::Value) -> AuthResult<AuthSession> {
        let response: AccountTokenResponse = self.account_request(method, payload).await?;
        let session = response.into_session()?;
        self.store.save_session(&session)?;
        Ok(session)
    }
}

impl<S: SessionPersistence> IdentityProvider for FirebaseAuthClient<S> {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;
        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let session = self.token_request("signInWithPassword", &payload).await?;
        tracing::info!("Signed in user {}", session.user.id);
        Ok(session)
    }

    async fn register(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;
        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let session = self.token_request("signUp", &payload).await?;
        tracing::info!("Registered user {}", session.user.id);
        Ok(session)
    }

    async fn send_verification_email(&self, session: &AuthSession) -> AuthResult<()> {
        let payload = serde_json::json!({
            "requestType": "VERIFY_EMAIL",
            "idToken": session.id_token,
        });
        let _: serde_json::Value = self.account_request("sendOobCode", &payload).await?;
        tracing::info!("Verification email sent to user {}", session.user.id);
        Ok(())
    }

    async fn reload_and_check_verified(&self, session: &AuthSession) -> AuthResult<bool> {
        let refreshed;
        let session = if session.is_expired() {
            refreshed = self.refresh_session(session).await?;
            &refreshed
        } else {
            session
        };
        let payload = serde_json::json!({ "idToken": session.id_token });
        let response: LookupResponse = self.account_request("lookup", &payload).await?;
        let user = response
            .users
            .into_iter()
            .find(|user| user.local_id == session.user.id)
            .ok_or_else(|| AuthError::Api(api_error_message("USER_NOT_FOUND")))?;
        Ok(user.email_verified.unwrap_or(false))
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        if email.trim().is_empty() {
            return Err(AuthError::Api(MISSING_EMAIL_MESSAGE.to_string()));
        }
        let payload = serde_json::json!({
            "requestType": "PASSWORD_RESET",
            "email": email.trim(),
        });
        let _: serde_json::Value = self.account_request("sendOobCode", &payload).await?;
        Ok(())
    }

    async fn federated_sign_in(
        &self,
        credential: &FederatedCredential,
    ) -> AuthResult<AuthSession> {
        if credential.id_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Federated ID token must not be empty",
            ));
        }
        let payload = serde_json::json!({
            "postBody": credential.post_body(),
            "requestUri": IDP_REQUEST_URI,
            "returnIdpCredential": true,
            "returnSecureToken": true,
        });
        let session = self.token_request("signInWithIdp", &payload).await?;
        tracing::info!(
            "Signed in user {} with {}",
            session.user.id,
            credential.provider_id
        );
        Ok(session)
    }
}

pub fn normalize_endpoint(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "Identity endpoint must not be empty",
        ));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AuthError::InvalidConfiguration(
            "Identity endpoint must include http:// or https://",
        ));
    }
    Ok(trimmed.to_string())
}

/// `None` when no API key is configured at all.
pub fn resolve_optional_firebase_config(api_key: Option<String>) -> Option<String> {
    normalize_text_option(api_key)
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api(MISSING_EMAIL_MESSAGE.to_string()));
    }
    if password.is_empty() {
        return Err(AuthError::Api(MISSING_PASSWORD_MESSAGE.to_string()));
    }
    Ok(())
}

fn expires_at_from(expires_in: &str) -> AuthResult<i64> {
    let seconds = expires_in.trim().parse::<i64>().map_err(|_| {
        AuthError::Api(format!("Auth response had an invalid expiry: {expires_in}"))
    })?;
    Ok(unix_timestamp_now().saturating_add(seconds))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountTokenResponse {
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<String>,
    local_id: Option<String>,
    email: Option<String>,
    email_verified: Option<bool>,
}

impl AccountTokenResponse {
    fn into_session(self) -> AuthResult<AuthSession> {
        match (self.id_token, self.refresh_token, self.expires_in, self.local_id) {
            (Some(id_token), Some(refresh_token), Some(expires_in), Some(local_id)) => {
                Ok(AuthSession {
                    id_token,
                    refresh_token,
                    expires_at: expires_at_from(&expires_in)?,
                    user: AuthUser {
                        id: local_id,
                        email: self.email,
                        email_verified: self.email_verified.unwrap_or(false),
                    },
                })
            }
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SecureTokenResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email_verified: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorEnvelope {
    error: FirebaseErrorBody,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    message: Option<String>,
}

/// User-facing description for a Firebase error code, matching the platform
/// SDK wording. Unknown codes are returned unchanged.
fn api_error_message(raw: &str) -> String {
    let code = raw.split(" : ").next().unwrap_or(raw).trim();
    let message = match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => {
            "There is no user record corresponding to this identifier. The user may have been deleted."
        }
        "INVALID_PASSWORD" => "The password is invalid or the user does not have a password.",
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => {
            "The supplied auth credential is malformed or has expired."
        }
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "MISSING_EMAIL" => MISSING_EMAIL_MESSAGE,
        "MISSING_PASSWORD" => MISSING_PASSWORD_MESSAGE,
        "WEAK_PASSWORD" => "The password must be 6 characters long or more.",
        "USER_DISABLED" => "The user account has been disabled by an administrator.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "We have blocked all requests from this device due to unusual activity. Try again later."
        }
        "OPERATION_NOT_ALLOWED" => {
            "The given sign-in provider is disabled for this Firebase project."
        }
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_TOKEN_EXPIRED" => {
            "The user's credential is no longer valid. The user must sign in again."
        }
        _ => return raw.trim().to_string(),
    };
    message.to_string()
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<FirebaseErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message {
            return api_error_message(&message);
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", crate::util::compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_endpoint_trims_trailing_slash() {
        assert_eq!(
            normalize_endpoint("https://identitytoolkit.googleapis.com/v1/").unwrap(),
            "https://identitytoolkit.googleapis.com/v1"
        );
    }

    #[test]
    fn normalize_endpoint_requires_http_scheme() {
        assert!(normalize_endpoint("identitytoolkit.googleapis.com").is_err());
        assert!(normalize_endpoint("   ").is_err());
    }

    #[test]
    fn client_rejects_blank_api_key() {
        let result = FirebaseAuthClient::new("  ", MemorySessionStore::default());
        assert!(matches!(result, Err(AuthError::InvalidConfiguration(_))));
    }

    #[test]
    fn resolve_optional_config_ignores_blank_key() {
        assert_eq!(resolve_optional_firebase_config(Some("  ".to_string())), None);
        assert_eq!(
            resolve_optional_firebase_config(Some(" key ".to_string())),
            Some("key".to_string())
        );
    }

    #[test]
    fn known_error_codes_map_to_sdk_messages() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(
            parse_api_error(StatusCode::BAD_REQUEST, body),
            "The email address is already in use by another account."
        );

        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        assert_eq!(
            parse_api_error(StatusCode::BAD_REQUEST, body),
            "The password must be 6 characters long or more."
        );
    }

    #[test]
    fn unknown_error_codes_pass_through() {
        let body = r#"{"error":{"code":400,"message":"PROJECT_NOT_FOUND"}}"#;
        assert_eq!(
            parse_api_error(StatusCode::BAD_REQUEST, body),
            "PROJECT_NOT_FOUND"
        );
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, ""), "HTTP 502");
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down (502)"
        );
    }

    #[test]
    fn token_response_builds_session() {
        let response: AccountTokenResponse = serde_json::from_str(
            r#"{
                "idToken": "id",
                "refreshToken": "refresh",
                "expiresIn": "3600",
                "localId": "uid-1",
                "email": "user@example.com",
                "registered": true
            }"#,
        )
        .unwrap();
        let session = response.into_session().unwrap();
        assert_eq!(session.user.id, "uid-1");
        assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
        assert!(!session.user.email_verified);
        assert!(!session.is_expired());
    }

    #[test]
    fn token_response_without_tokens_is_an_error() {
        let response: AccountTokenResponse =
            serde_json::from_str(r#"{"localId": "uid-1"}"#).unwrap();
        assert!(matches!(response.into_session(), Err(AuthError::Api(_))));
    }

    #[test]
    fn federated_post_body_is_form_encoded() {
        let credential = FederatedCredential::google("a+b/c", Some("tok".to_string()));
        assert_eq!(
            credential.post_body(),
            "id_token=a%2Bb%2Fc&access_token=tok&providerId=google.com"
        );
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            id_token: "secret-id-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
                email_verified: false,
            },
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-id-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(session.is_expired());
    }

    #[test]
    fn memory_store_round_trips_and_clears() {
        let store = MemorySessionStore::default();
        assert_eq!(store.load_session().unwrap(), None);

        let session = AuthSession {
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            user: AuthUser {
                id: "uid".to_string(),
                email: Some("user@example.com".to_string()),
                email_verified: true,
            },
        };
        store.save_session(&session).unwrap();
        assert_eq!(store.clone().load_session().unwrap(), Some(session));

        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[tokio::test]
    async fn expired_session_without_refresh_token_is_rejected_before_lookup() {
        let client = FirebaseAuthClient::new("key", MemorySessionStore::default()).unwrap();
        let session = AuthSession {
            id_token: "id".to_string(),
            refresh_token: String::new(),
            expires_at: 0,
            user: AuthUser {
                id: "uid".to_string(),
                email: None,
                email_verified: false,
            },
        };
        let error = client.reload_and_check_verified(&session).await.unwrap_err();
        assert!(matches!(error, AuthError::InvalidConfiguration(_)));
    }

    #[test]
    fn credential_debug_redacts_tokens() {
        let credential = FederatedCredential::google("google-id-token", None);
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("google-id-token"));
        assert!(rendered.contains("google.com"));
    }
}
