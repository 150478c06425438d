//! Outgoing mail collaborator.
//!
//! The promotion screen hands a [`MailDraft`] to a [`MailComposer`] and gets
//! back one of three outcomes: sent/saved, cancelled by the user, or failed.

mod outbox;

use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub use outbox::OutboxComposer;

const BASE64_LINE_WIDTH: usize = 76;
const MESSAGE_ID_DOMAIN: &str = "skincheck.local";

/// A file attached to an outgoing mail.
#[derive(Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for MailAttachment {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MailAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A composed mail awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: Option<MailAttachment>,
}

/// How a compose session ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailOutcome {
    Sent,
    Saved,
    Cancelled,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail has no recipients")]
    NoRecipients,
    #[error("Mail services are not available: {0}")]
    Unavailable(String),
    #[error("Failed to write mail: {0}")]
    Io(#[from] std::io::Error),
    #[error("Mail sending failed: {0}")]
    Failed(String),
}

/// Platform mail composition.
#[allow(async_fn_in_trait)]
pub trait MailComposer {
    async fn compose(&self, draft: MailDraft) -> Result<MailOutcome, MailError>;
}

/// Unique RFC 5322 message identifier.
#[must_use]
pub fn new_message_id() -> String {
    format!("{}@{}", Uuid::now_v7(), MESSAGE_ID_DOMAIN)
}

/// Render a draft as an RFC 5322 message with CRLF line endings.
///
/// Drafts with an attachment become `multipart/mixed` with the attachment
/// base64-encoded.
#[must_use]
pub fn render_message(draft: &MailDraft, message_id: &str, date: DateTime<Utc>) -> String {
    let mut message = String::new();
    push_line(&mut message, &format!("To: {}", draft.recipients.join(", ")));
    push_line(&mut message, &format!("Subject: {}", draft.subject));
    push_line(&mut message, &format!("Date: {}", date.to_rfc2822()));
    push_line(&mut message, &format!("Message-ID: <{message_id}>"));
    push_line(&mut message, "MIME-Version: 1.0");

    let Some(attachment) = &draft.attachment else {
        push_text_part_headers(&mut message);
        push_line(&mut message, "");
        push_body(&mut message, &draft.body);
        return message;
    };

    let boundary = format!("skincheck-{}", Uuid::now_v7().simple());
    push_line(
        &mut message,
        &format!("Content-Type: multipart/mixed; boundary=\"{boundary}\""),
    );
    push_line(&mut message, "");

    push_line(&mut message, &format!("--{boundary}"));
    push_text_part_headers(&mut message);
    push_line(&mut message, "");
    push_body(&mut message, &draft.body);

    push_line(&mut message, &format!("--{boundary}"));
    push_line(
        &mut message,
        &format!(
            "Content-Type: {}; name=\"{}\"",
            attachment.mime_type, attachment.file_name
        ),
    );
    push_line(
        &mut message,
        &format!(
            "Content-Disposition: attachment; filename=\"{}\"",
            attachment.file_name
        ),
    );
    push_line(&mut message, "Content-Transfer-Encoding: base64");
    push_line(&mut message, "");
    let encoded = STANDARD.encode(&attachment.bytes);
    for chunk in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
        push_line(&mut message, &String::from_utf8_lossy(chunk));
    }
    push_line(&mut message, &format!("--{boundary}--"));
    message
}

fn push_text_part_headers(message: &mut String) {
    push_line(message, "Content-Type: text/plain; charset=utf-8");
    push_line(message, "Content-Transfer-Encoding: 8bit");
}

fn push_body(message: &mut String, body: &str) {
    for line in body.lines() {
        push_line(message, line);
    }
}

fn push_line(message: &mut String, line: &str) {
    let _ = write!(message, "{line}\r\n");
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn draft(attachment: Option<MailAttachment>) -> MailDraft {
        MailDraft {
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            subject: "New Product Submission".to_string(),
            body: "Sender Email: user@example.com\nProduct Name: Serum".to_string(),
            attachment,
        }
    }

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn plain_message_has_headers_and_body() {
        let rendered = render_message(&draft(None), "id@skincheck.local", fixed_date());
        assert!(rendered.starts_with("To: a@example.com, b@example.com\r\n"));
        assert!(rendered.contains("Subject: New Product Submission\r\n"));
        assert!(rendered.contains("Message-ID: <id@skincheck.local>\r\n"));
        assert!(rendered.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(rendered.contains("\r\n\r\nSender Email: user@example.com\r\nProduct Name: Serum\r\n"));
        assert!(!rendered.contains("multipart"));
    }

    #[test]
    fn attachment_is_base64_encoded_in_multipart() {
        let attachment = MailAttachment {
            file_name: "product_image.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        };
        let rendered = render_message(&draft(Some(attachment)), "id@skincheck.local", fixed_date());
        assert!(rendered.contains("Content-Type: multipart/mixed; boundary=\"skincheck-"));
        assert!(rendered.contains("Content-Disposition: attachment; filename=\"product_image.jpg\""));
        assert!(rendered.contains("\r\n/9j/4A==\r\n"));
        assert!(rendered.trim_end().ends_with("--"));
    }

    #[test]
    fn long_attachments_wrap_at_76_columns() {
        let attachment = MailAttachment {
            file_name: "product_image.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![7; 300],
        };
        let rendered = render_message(&draft(Some(attachment)), "id@skincheck.local", fixed_date());
        assert!(rendered.split("\r\n").all(|line| line.len() <= 998));
        let base64_lines: Vec<_> = rendered
            .split("\r\n")
            .filter(|line| line.starts_with("BwcH"))
            .collect();
        assert!(base64_lines.len() > 1);
        assert!(base64_lines.iter().all(|line| line.len() <= BASE64_LINE_WIDTH));
    }

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(new_message_id(), new_message_id());
    }
}
