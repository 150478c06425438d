//! Product promotion submission model

use crate::mail::{MailAttachment, MailDraft};
use crate::media::{encode_jpeg_attachment, ATTACHMENT_JPEG_QUALITY};
use crate::validation::{validate_promotion, ValidationError};

use super::CapturedImage;

/// Subject line of every promotion mail.
pub const PROMOTION_SUBJECT: &str = "New Product Submission";

const ATTACHMENT_FILE_NAME: &str = "product_image.jpg";
const ATTACHMENT_MIME_TYPE: &str = "image/jpeg";

/// Form data for the "Promote Your Products" screen.
///
/// Lives only for the duration of the screen; consumed by the mail composer
/// on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionSubmission {
    pub sender_email: String,
    pub product_name: String,
    pub product_content: String,
    pub product_functionality: String,
    pub attached_image: Option<CapturedImage>,
}

impl PromotionSubmission {
    /// Check the form, returning the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_promotion(self)
    }

    /// Plain-text mail body listing the submitted fields.
    #[must_use]
    pub fn mail_body(&self) -> String {
        format!(
            "Sender Email: {}\nProduct Name: {}\nProduct Content: {}\nProduct Functionality: {}",
            self.sender_email,
            self.product_name,
            self.product_content,
            self.product_functionality,
        )
    }

    /// Build the outgoing mail for a validated submission.
    ///
    /// The attached photo is re-encoded as JPEG; a photo that cannot be
    /// decoded is left out rather than failing the submission.
    pub fn to_mail_draft(&self, recipients: &[String]) -> Result<MailDraft, ValidationError> {
        self.validate()?;

        let attachment = self.attached_image.as_ref().and_then(|image| {
            match encode_jpeg_attachment(image.bytes(), ATTACHMENT_JPEG_QUALITY) {
                Ok(bytes) => Some(MailAttachment {
                    file_name: ATTACHMENT_FILE_NAME.to_string(),
                    mime_type: ATTACHMENT_MIME_TYPE.to_string(),
                    bytes,
                }),
                Err(error) => {
                    tracing::warn!("Dropping promotion attachment: {}", error);
                    None
                }
            }
        });

        Ok(MailDraft {
            recipients: recipients.to_vec(),
            subject: PROMOTION_SUBJECT.to_string(),
            body: self.mail_body(),
            attachment,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled() -> PromotionSubmission {
        PromotionSubmission {
            sender_email: "user@example.com".to_string(),
            product_name: "Serum".to_string(),
            product_content: "Hydrating".to_string(),
            product_functionality: "Moisturizes".to_string(),
            attached_image: None,
        }
    }

    #[test]
    fn mail_body_lists_fields_as_entered() {
        assert_eq!(
            filled().mail_body(),
            "Sender Email: user@example.com\nProduct Name: Serum\nProduct Content: Hydrating\nProduct Functionality: Moisturizes"
        );

        let padded = PromotionSubmission {
            product_name: " Serum ".to_string(),
            ..filled()
        };
        assert!(padded.mail_body().contains("Product Name:  Serum \n"));
    }

    #[test]
    fn mail_draft_uses_fixed_subject() {
        let recipients = vec!["team@example.com".to_string()];
        let draft = filled().to_mail_draft(&recipients).unwrap();
        assert_eq!(draft.subject, PROMOTION_SUBJECT);
        assert_eq!(draft.recipients, recipients);
        assert!(draft.attachment.is_none());
    }

    #[test]
    fn mail_draft_rejects_invalid_form() {
        let mut submission = filled();
        submission.product_name.clear();
        assert_eq!(
            submission.to_mail_draft(&[]).unwrap_err(),
            ValidationError::ProductNameRequired
        );
    }

    #[test]
    fn undecodable_photo_is_left_out() {
        let mut submission = filled();
        submission.attached_image = Some(CapturedImage::from_bytes(b"garbage".to_vec()));
        let draft = submission.to_mail_draft(&[]).unwrap();
        assert!(draft.attachment.is_none());
    }
}
