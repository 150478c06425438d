//! Synchronous form validation.
//!
//! Each validator checks its rules in a fixed order and reports only the
//! first one that fails. Values are checked exactly as entered.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{PromotionSubmission, RegistrationForm};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("Invalid regex")
});

/// A local validation failure; `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sender Email is required.")]
    SenderEmailRequired,
    #[error("Invalid email format.")]
    InvalidEmailFormat,
    #[error("Product Name is required.")]
    ProductNameRequired,
    #[error("Product Content is required.")]
    ProductContentRequired,
    #[error("Product Functionality is required.")]
    ProductFunctionalityRequired,
    #[error("First Name is required.")]
    FirstNameRequired,
    #[error("Last Name is required.")]
    LastNameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Password is required.")]
    PasswordRequired,
    #[error("Please enter your email address.")]
    ResetEmailRequired,
    #[error("Please upload a photo first to analyze.")]
    PhotoRequired,
}

/// Whole-string match against `local-part@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn require(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

/// Sender email presence, sender email format, product name, product
/// content, product functionality.
pub fn validate_promotion(submission: &PromotionSubmission) -> Result<(), ValidationError> {
    require(
        &submission.sender_email,
        ValidationError::SenderEmailRequired,
    )?;
    if !is_valid_email(&submission.sender_email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    require(
        &submission.product_name,
        ValidationError::ProductNameRequired,
    )?;
    require(
        &submission.product_content,
        ValidationError::ProductContentRequired,
    )?;
    require(
        &submission.product_functionality,
        ValidationError::ProductFunctionalityRequired,
    )
}

/// First name, last name, email, password. Password strength is left to the
/// identity provider.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    require(&form.first_name, ValidationError::FirstNameRequired)?;
    require(&form.last_name, ValidationError::LastNameRequired)?;
    require(&form.email, ValidationError::EmailRequired)?;
    require(&form.password, ValidationError::PasswordRequired)
}

/// A password reset request needs an email address.
pub fn validate_reset_email(email: &str) -> Result<(), ValidationError> {
    require(email, ValidationError::ResetEmailRequired)
}
