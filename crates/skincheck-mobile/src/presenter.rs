//! Text and value formatting shared by the mobile views.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use chrono::NaiveDate;
use skincheck_core::flow::SubmissionStatus;
use skincheck_core::Screen;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub const fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Unauthenticated => "Sign in",
        Screen::Authenticated => "SkinCheck",
        Screen::CaptureReady | Screen::CaptureComplete => "Analyze your skin",
        Screen::AnalysisPending => "Analyzing",
        Screen::ResultShown => "Your result",
        Screen::ProductBrowsing => "Recommended products",
    }
}

/// Value for an `<input type="date">`.
pub fn birth_date_input_value(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}

/// Parse an `<input type="date">` value; anything else is ignored.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BIRTH_DATE_FORMAT).ok()
}

/// Toast shown after a promotion submit, as (title, description).
pub fn submission_toast(status: &SubmissionStatus) -> Option<(&'static str, String)> {
    match status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Sent => Some((
            "Submission sent",
            "Thanks! We will review your product.".to_string(),
        )),
        SubmissionStatus::Saved => Some((
            "Draft saved",
            "Your submission was saved as a draft.".to_string(),
        )),
        SubmissionStatus::Cancelled => Some((
            "Submission cancelled",
            "Nothing was sent.".to_string(),
        )),
        SubmissionStatus::Failed(message) => Some(("Submission failed", message.clone())),
    }
}

/// "1. Name" style label for a product row.
pub fn product_label(index: usize, name: &str) -> String {
    format!("{}. {name}", index + 1)
}
