//! Screen flow: state machine, analysis timer and the form-driven flows.

mod auth;
mod controller;
mod promotion;
mod state;
mod timer;

#[cfg(test)]
pub(crate) mod testing;

use crate::models::{CapturedImage, ImageSource};

pub use auth::{
    request_password_reset, RegistrationFlow, RegistrationStage, EMAIL_NOT_VERIFIED_MESSAGE,
    EMAIL_VERIFIED_MESSAGE, PASSWORD_RESET_SENT_MESSAGE, USER_NOT_FOUND_MESSAGE,
    VERIFICATION_PROMPT,
};
pub use controller::{ScreenController, ScreenEvent};
pub use promotion::{PromotionScreen, SubmissionStatus};
pub use state::{AnalysisRunId, AnalysisStart, FlowError, Screen, SessionState};
pub use timer::{AnalysisTimer, ANALYSIS_DELAY};

/// Platform photo picker or camera.
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    /// `None` when the user cancelled.
    async fn capture(&self, source: ImageSource) -> Option<CapturedImage>;
}
