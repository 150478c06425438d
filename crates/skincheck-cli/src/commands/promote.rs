use std::path::PathBuf;

use skincheck_core::flow::{PromotionScreen, SubmissionStatus};
use skincheck_core::mail::OutboxComposer;
use skincheck_core::ImageSource;

use crate::cli::PromoteArgs;
use crate::commands::common::load_app_config;
use crate::error::CliError;
use crate::photo::FilePhotoSource;

pub async fn run_promote(args: PromoteArgs, profile: Option<&str>) -> Result<(), CliError> {
    let (_, config) = load_app_config(profile)?;
    let outbox = args
        .outbox
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.outbox_dir()));

    let mut screen = promotion_screen(&args, config.recipients());
    if let Some(image) = &args.image {
        if !image.is_file() {
            return Err(CliError::ImageNotFound(image.display().to_string()));
        }
        screen
            .attach_photo(&FilePhotoSource::new(image), ImageSource::Library)
            .await;
    }

    let composer = OutboxComposer::new(&outbox);
    let message = status_message(screen.submit(&composer).await?, &outbox);
    println!("{message}");
    Ok(())
}

pub fn promotion_screen(args: &PromoteArgs, recipients: Vec<String>) -> PromotionScreen {
    let mut screen = PromotionScreen::new(recipients);
    screen.submission.sender_email.clone_from(&args.email);
    screen.submission.product_name.clone_from(&args.name);
    screen.submission.product_content.clone_from(&args.content);
    screen
        .submission
        .product_functionality
        .clone_from(&args.functionality);
    screen
}

pub fn status_message(status: &SubmissionStatus, outbox: &std::path::Path) -> String {
    match status {
        SubmissionStatus::Sent => format!("Product submission queued in {}", outbox.display()),
        SubmissionStatus::Saved => "Product submission saved as a draft".to_string(),
        SubmissionStatus::Cancelled => "Product submission cancelled".to_string(),
        SubmissionStatus::Failed(message) => format!("Product submission failed: {message}"),
        SubmissionStatus::Idle => "Product submission not sent".to_string(),
    }
}
