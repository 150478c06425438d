//! "Promote Your Products" screen.

use super::state::FlowError;
use super::PhotoSource;
use crate::mail::{MailComposer, MailOutcome};
use crate::models::{ImageSource, PromotionSubmission};

/// Outcome of the last submission attempt. Mail failures land here and never
/// block the screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sent,
    Saved,
    Cancelled,
    Failed(String),
}

impl SubmissionStatus {
    /// Whether the mail went out (or was saved as a draft).
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Sent | Self::Saved)
    }
}

impl From<MailOutcome> for SubmissionStatus {
    fn from(outcome: MailOutcome) -> Self {
        match outcome {
            MailOutcome::Sent => Self::Sent,
            MailOutcome::Saved => Self::Saved,
            MailOutcome::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromotionScreen {
    pub submission: PromotionSubmission,
    recipients: Vec<String>,
    status: SubmissionStatus,
    error_message: Option<String>,
}

impl PromotionScreen {
    pub fn new(recipients: Vec<String>) -> Self {
        Self {
            submission: PromotionSubmission::default(),
            recipients,
            status: SubmissionStatus::Idle,
            error_message: None,
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub const fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Validation message from the last submit, if it was rejected.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Attach a product photo. Cancelling keeps the previous one.
    pub async fn attach_photo<P: PhotoSource>(&mut self, photos: &P, source: ImageSource) -> bool {
        match photos.capture(source).await {
            Some(image) => {
                self.submission.attached_image = Some(image);
                true
            }
            None => false,
        }
    }

    /// Validate, then hand the mail to the composer.
    ///
    /// Validation failures are returned (and kept for display); composer
    /// results only update [`Self::status`].
    pub async fn submit<M: MailComposer>(
        &mut self,
        composer: &M,
    ) -> Result<&SubmissionStatus, FlowError> {
        let draft = match self.submission.to_mail_draft(&self.recipients) {
            Ok(draft) => draft,
            Err(error) => {
                self.error_message = Some(error.to_string());
                return Err(error.into());
            }
        };
        self.error_message = None;

        self.status = match composer.compose(draft).await {
            Ok(outcome) => {
                tracing::info!("Promotion mail finished: {:?}", outcome);
                outcome.into()
            }
            Err(error) => {
                tracing::warn!("Promotion mail failed: {}", error);
                SubmissionStatus::Failed(error.to_string())
            }
        };
        Ok(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flow::testing::{RecordingComposer, ScriptedPhotos};

    fn filled_screen() -> PromotionScreen {
        let mut screen = PromotionScreen::new(vec!["team@example.com".to_string()]);
        screen.submission.sender_email = "user@example.com".to_string();
        screen.submission.product_name = "Serum".to_string();
        screen.submission.product_content = "Hydrating".to_string();
        screen.submission.product_functionality = "Moisturizes".to_string();
        screen
    }

    #[tokio::test]
    async fn valid_submission_is_composed_and_sent() {
        let composer = RecordingComposer::with_outcome(MailOutcome::Sent);
        let mut screen = filled_screen();

        let status = screen.submit(&composer).await.unwrap();
        assert_eq!(status, &SubmissionStatus::Sent);
        assert!(screen.status().is_delivered());

        let drafts = composer.drafts.borrow();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].subject, "New Product Submission");
        assert_eq!(drafts[0].recipients, vec!["team@example.com".to_string()]);
        assert_eq!(
            drafts[0].body,
            "Sender Email: user@example.com\nProduct Name: Serum\nProduct Content: Hydrating\nProduct Functionality: Moisturizes"
        );
        assert!(drafts[0].attachment.is_none());
    }

    #[tokio::test]
    async fn empty_email_blocks_the_composer() {
        let composer = RecordingComposer::with_outcome(MailOutcome::Sent);
        let mut screen = filled_screen();
        screen.submission.sender_email.clear();

        let error = screen.submit(&composer).await.unwrap_err();
        assert_eq!(error.to_string(), "Sender Email is required.");
        assert_eq!(screen.error_message(), Some("Sender Email is required."));
        assert!(composer.drafts.borrow().is_empty());
        assert_eq!(screen.status(), &SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn mail_failure_only_sets_the_status() {
        let composer = RecordingComposer::failing("no mail account");
        let mut screen = filled_screen();

        let status = screen.submit(&composer).await.unwrap().clone();
        assert_eq!(
            status,
            SubmissionStatus::Failed("Mail sending failed: no mail account".to_string())
        );
        assert_eq!(screen.error_message(), None);
    }

    #[tokio::test]
    async fn cancelled_compose_is_not_delivered() {
        let composer = RecordingComposer::with_outcome(MailOutcome::Cancelled);
        let mut screen = filled_screen();
        screen.submit(&composer).await.unwrap();
        assert_eq!(screen.status(), &SubmissionStatus::Cancelled);
        assert!(!screen.status().is_delivered());
    }

    #[tokio::test]
    async fn cancelled_photo_keeps_previous_attachment() {
        let mut screen = filled_screen();
        assert!(screen.attach_photo(&ScriptedPhotos::returning_jpeg(), ImageSource::Library).await);
        let attached = screen.submission.attached_image.clone();
        assert!(attached.is_some());

        assert!(!screen.attach_photo(&ScriptedPhotos::cancelling(), ImageSource::Camera).await);
        assert_eq!(screen.submission.attached_image, attached);
    }
}
