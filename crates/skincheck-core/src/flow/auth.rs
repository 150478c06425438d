//! Registration with email verification, and password reset.

use super::state::{FlowError, Screen};
use crate::auth::{AuthError, AuthSession, IdentityProvider};
use crate::models::RegistrationForm;
use crate::validation::validate_reset_email;

pub const VERIFICATION_PROMPT: &str = "Please check your email for the verification link.";
pub const EMAIL_VERIFIED_MESSAGE: &str = "Email verified successfully!";
pub const EMAIL_NOT_VERIFIED_MESSAGE: &str = "Email not verified yet. Please try again.";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found. Please try signing in again.";
pub const PASSWORD_RESET_SENT_MESSAGE: &str = "Password reset email sent!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Editing,
    AwaitingVerification,
    Verified,
}

/// Register, send the verification mail, then poll until the user confirms.
#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    pub form: RegistrationForm,
    stage: RegistrationStage,
    session: Option<AuthSession>,
    error_message: Option<String>,
    status_message: Option<String>,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::default(),
            stage: RegistrationStage::Editing,
            session: None,
            error_message: None,
            status_message: None,
        }
    }

    pub const fn stage(&self) -> RegistrationStage {
        self.stage
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The session once the email address has been verified.
    pub fn verified_session(&self) -> Option<&AuthSession> {
        match self.stage {
            RegistrationStage::Verified => self.session.as_ref(),
            _ => None,
        }
    }

    pub async fn submit<P: IdentityProvider>(&mut self, provider: &P) -> Result<(), FlowError> {
        if self.stage != RegistrationStage::Editing {
            return Err(FlowError::InvalidTransition {
                from: Screen::Unauthenticated,
                action: "submit a registration that was already sent",
            });
        }
        if let Err(error) = self.form.validate() {
            self.error_message = Some(error.to_string());
            return Err(error.into());
        }

        let session = match provider
            .register(self.form.email.trim(), &self.form.password)
            .await
        {
            Ok(session) => session,
            Err(error) => {
                self.error_message = Some(error.to_string());
                return Err(error.into());
            }
        };
        tracing::info!("Registered account {}", session.user.id);
        self.error_message = None;
        self.session = Some(session);
        self.send_verification(provider).await
    }

    /// Send (or resend) the verification mail for the registered account.
    pub async fn send_verification<P: IdentityProvider>(
        &mut self,
        provider: &P,
    ) -> Result<(), FlowError> {
        let Some(session) = &self.session else {
            self.error_message = Some(USER_NOT_FOUND_MESSAGE.to_string());
            return Err(AuthError::Api(USER_NOT_FOUND_MESSAGE.to_string()).into());
        };
        if let Err(error) = provider.send_verification_email(session).await {
            self.error_message = Some(error.to_string());
            return Err(error.into());
        }
        self.stage = RegistrationStage::AwaitingVerification;
        self.error_message = None;
        self.status_message = Some(VERIFICATION_PROMPT.to_string());
        Ok(())
    }

    /// Reload the account and report whether the email is verified.
    pub async fn check_verification<P: IdentityProvider>(
        &mut self,
        provider: &P,
    ) -> Result<bool, FlowError> {
        let Some(session) = &self.session else {
            self.error_message = Some(USER_NOT_FOUND_MESSAGE.to_string());
            return Ok(false);
        };

        match provider.reload_and_check_verified(session).await {
            Ok(true) => {
                self.stage = RegistrationStage::Verified;
                self.error_message = None;
                self.status_message = Some(EMAIL_VERIFIED_MESSAGE.to_string());
                Ok(true)
            }
            Ok(false) => {
                self.error_message = Some(EMAIL_NOT_VERIFIED_MESSAGE.to_string());
                Ok(false)
            }
            Err(error) => {
                self.error_message = Some(error.to_string());
                Err(error.into())
            }
        }
    }

    /// The "Cancel" button: reset the form and start over.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }
}

/// Ask the provider to mail a reset link. Returns the confirmation text.
pub async fn request_password_reset<P: IdentityProvider>(
    provider: &P,
    email: &str,
) -> Result<&'static str, FlowError> {
    validate_reset_email(email)?;
    provider.send_password_reset(email.trim()).await?;
    tracing::info!("Password reset requested");
    Ok(PASSWORD_RESET_SENT_MESSAGE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flow::testing::ScriptedIdentity;

    fn filled_flow() -> RegistrationFlow {
        let mut flow = RegistrationFlow::new();
        flow.form.first_name = "Ada".to_string();
        flow.form.last_name = "Lovelace".to_string();
        flow.form.email = " ada@example.com ".to_string();
        flow.form.password = "hunter22".to_string();
        flow
    }

    #[tokio::test]
    async fn submit_registers_and_sends_verification() {
        let provider = ScriptedIdentity::unverified();
        let mut flow = filled_flow();

        flow.submit(&provider).await.unwrap();
        assert_eq!(flow.stage(), RegistrationStage::AwaitingVerification);
        assert_eq!(flow.status_message(), Some(VERIFICATION_PROMPT));
        assert_eq!(*provider.registered.borrow(), vec!["ada@example.com".to_string()]);
        assert_eq!(provider.verification_emails.get(), 1);
        assert!(flow.verified_session().is_none());
    }

    #[tokio::test]
    async fn missing_first_name_is_reported_first() {
        let provider = ScriptedIdentity::default();
        let mut flow = filled_flow();
        flow.form.first_name.clear();
        flow.form.email.clear();

        let error = flow.submit(&provider).await.unwrap_err();
        assert_eq!(error.to_string(), "First Name is required.");
        assert_eq!(flow.error_message(), Some("First Name is required."));
        assert!(provider.registered.borrow().is_empty());
    }

    #[tokio::test]
    async fn provider_error_is_surfaced_verbatim() {
        let provider =
            ScriptedIdentity::failing("The email address is already in use by another account.");
        let mut flow = filled_flow();

        assert!(flow.submit(&provider).await.is_err());
        assert_eq!(
            flow.error_message(),
            Some("The email address is already in use by another account.")
        );
        assert_eq!(flow.stage(), RegistrationStage::Editing);
    }

    #[tokio::test]
    async fn verification_polls_until_confirmed() {
        let provider = ScriptedIdentity::unverified();
        let mut flow = filled_flow();
        flow.submit(&provider).await.unwrap();

        assert!(!flow.check_verification(&provider).await.unwrap());
        assert_eq!(flow.error_message(), Some(EMAIL_NOT_VERIFIED_MESSAGE));

        provider.set_verified(true);
        assert!(flow.check_verification(&provider).await.unwrap());
        assert_eq!(flow.stage(), RegistrationStage::Verified);
        assert_eq!(flow.status_message(), Some(EMAIL_VERIFIED_MESSAGE));
        assert_eq!(flow.error_message(), None);
        assert!(flow.verified_session().is_some());
    }

    #[tokio::test]
    async fn verification_without_account_reports_user_not_found() {
        let mut flow = RegistrationFlow::new();
        assert!(!flow
            .check_verification(&ScriptedIdentity::default())
            .await
            .unwrap());
        assert_eq!(flow.error_message(), Some(USER_NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn resending_without_account_is_an_error() {
        let provider = ScriptedIdentity::default();
        let mut flow = RegistrationFlow::new();

        let error = flow.send_verification(&provider).await.unwrap_err();
        assert!(matches!(error, FlowError::Auth(AuthError::Api(_))));
        assert_eq!(error.to_string(), USER_NOT_FOUND_MESSAGE);
        assert_eq!(flow.error_message(), Some(USER_NOT_FOUND_MESSAGE));
        assert_eq!(flow.stage(), RegistrationStage::Editing);
        assert_eq!(provider.verification_emails.get(), 0);
    }

    #[tokio::test]
    async fn cancel_resets_everything() {
        let provider = ScriptedIdentity::unverified();
        let mut flow = filled_flow();
        flow.submit(&provider).await.unwrap();

        flow.cancel();
        assert_eq!(flow.stage(), RegistrationStage::Editing);
        assert_eq!(flow.form.first_name, "");
        assert_eq!(flow.status_message(), None);
    }

    #[tokio::test]
    async fn password_reset_requires_email() {
        let provider = ScriptedIdentity::default();
        let error = request_password_reset(&provider, "").await.unwrap_err();
        assert_eq!(error.to_string(), "Please enter your email address.");
        assert!(provider.reset_emails.borrow().is_empty());

        let message = request_password_reset(&provider, " user@example.com ")
            .await
            .unwrap();
        assert_eq!(message, PASSWORD_RESET_SENT_MESSAGE);
        assert_eq!(
            *provider.reset_emails.borrow(),
            vec!["user@example.com".to_string()]
        );
    }
}
