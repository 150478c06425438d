//! skincheck-core - Core library for SkinCheck
//!
//! This crate contains the diagnosis catalog, the placeholder outcome
//! selector, the screen flow state machine, form validation and the
//! collaborator interfaces (identity, photo source, mail) shared by the
//! SkinCheck front ends (mobile, CLI).

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod mail;
pub mod media;
pub mod models;
pub mod outcome;
pub mod util;
pub mod validation;

pub use auth::{AuthError, AuthSession, FederatedCredential, IdentityProvider};
pub use catalog::lookup;
pub use error::{Error, Result};
pub use flow::{FlowError, PhotoSource, Screen, ScreenController, SessionState};
pub use mail::{MailComposer, MailDraft, MailOutcome};
pub use models::{
    CapturedImage, DiagnosisCategory, DiagnosisRecord, ImageSource, ProductRecord,
    PromotionSubmission, RegistrationForm,
};
pub use outcome::{select_outcome, FixedOutcome, OutcomeSource, RandomOutcome};
pub use validation::ValidationError;
