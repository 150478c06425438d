use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{new_message_id, render_message, MailComposer, MailDraft, MailError, MailOutcome};

/// Composer that drops rendered `.eml` files into a directory.
///
/// Stands in for the platform mail sheet wherever one is not available; a
/// mail client or relay picks the files up from there.
#[derive(Debug, Clone)]
pub struct OutboxComposer {
    dir: PathBuf,
}

impl OutboxComposer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MailComposer for OutboxComposer {
    async fn compose(&self, draft: MailDraft) -> Result<MailOutcome, MailError> {
        if draft.recipients.iter().all(|recipient| recipient.trim().is_empty()) {
            return Err(MailError::NoRecipients);
        }

        std::fs::create_dir_all(&self.dir)?;
        let message_id = new_message_id();
        let path = self.dir.join(format!("{message_id}.eml"));
        std::fs::write(&path, render_message(&draft, &message_id, Utc::now()))?;

        tracing::info!(
            "Queued mail '{}' for {} recipient(s) at {}",
            draft.subject,
            draft.recipients.len(),
            path.display()
        );
        Ok(MailOutcome::Sent)
    }
}
