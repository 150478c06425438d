//! Scripted collaborators for flow tests.

use std::cell::{Cell, RefCell};

use super::PhotoSource;
use crate::auth::{AuthError, AuthResult, AuthSession, AuthUser, FederatedCredential, IdentityProvider};
use crate::mail::{MailComposer, MailDraft, MailError, MailOutcome};
use crate::models::{CapturedImage, ImageSource};

pub fn session_for(email: &str) -> AuthSession {
    AuthSession {
        id_token: "id-token".to_string(),
        refresh_token: "refresh-token".to_string(),
        expires_at: i64::MAX,
        user: AuthUser {
            id: "uid-1".to_string(),
            email: Some(email.to_string()),
            email_verified: false,
        },
    }
}

pub struct ScriptedIdentity {
    failure: Option<String>,
    verified: Cell<bool>,
    pub registered: RefCell<Vec<String>>,
    pub verification_emails: Cell<usize>,
    pub reset_emails: RefCell<Vec<String>>,
}

impl Default for ScriptedIdentity {
    fn default() -> Self {
        Self {
            failure: None,
            verified: Cell::new(true),
            registered: RefCell::new(Vec::new()),
            verification_emails: Cell::new(0),
            reset_emails: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedIdentity {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn unverified() -> Self {
        let identity = Self::default();
        identity.verified.set(false);
        identity
    }

    pub fn set_verified(&self, verified: bool) {
        self.verified.set(verified);
    }

    fn outcome<T>(&self, value: T) -> AuthResult<T> {
        match &self.failure {
            Some(message) => Err(AuthError::Api(message.clone())),
            None => Ok(value),
        }
    }
}

impl IdentityProvider for ScriptedIdentity {
    async fn sign_in(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        self.outcome(session_for(email))
    }

    async fn register(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        let session = self.outcome(session_for(email))?;
        self.registered.borrow_mut().push(email.to_string());
        Ok(session)
    }

    async fn send_verification_email(&self, _session: &AuthSession) -> AuthResult<()> {
        self.outcome(())?;
        self.verification_emails.set(self.verification_emails.get() + 1);
        Ok(())
    }

    async fn reload_and_check_verified(&self, _session: &AuthSession) -> AuthResult<bool> {
        self.outcome(self.verified.get())
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        self.outcome(())?;
        self.reset_emails.borrow_mut().push(email.to_string());
        Ok(())
    }

    async fn federated_sign_in(&self, _credential: &FederatedCredential) -> AuthResult<AuthSession> {
        self.outcome(session_for("google-user@example.com"))
    }
}

pub struct ScriptedPhotos {
    image: Option<CapturedImage>,
}

impl ScriptedPhotos {
    pub fn returning_jpeg() -> Self {
        Self {
            image: Some(CapturedImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10])),
        }
    }

    pub const fn cancelling() -> Self {
        Self { image: None }
    }
}

impl PhotoSource for ScriptedPhotos {
    async fn capture(&self, _source: ImageSource) -> Option<CapturedImage> {
        self.image.clone()
    }
}

pub struct RecordingComposer {
    result: Result<MailOutcome, String>,
    pub drafts: RefCell<Vec<MailDraft>>,
}

impl RecordingComposer {
    pub fn with_outcome(outcome: MailOutcome) -> Self {
        Self {
            result: Ok(outcome),
            drafts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            drafts: RefCell::new(Vec::new()),
        }
    }
}

impl MailComposer for RecordingComposer {
    async fn compose(&self, draft: MailDraft) -> Result<MailOutcome, MailError> {
        self.drafts.borrow_mut().push(draft);
        self.result.clone().map_err(MailError::Failed)
    }
}
