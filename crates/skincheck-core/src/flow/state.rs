//! Explicit screen state with named transitions.

use std::fmt;

use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::lookup;
use crate::models::{CapturedImage, DiagnosisCategory, DiagnosisRecord};
use crate::validation::ValidationError;

/// Where the user is in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Unauthenticated,
    Authenticated,
    CaptureReady,
    CaptureComplete,
    AnalysisPending,
    ResultShown,
    ProductBrowsing,
}

impl Screen {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::CaptureReady => "capture ready",
            Self::CaptureComplete => "capture complete",
            Self::AnalysisPending => "analysis pending",
            Self::ResultShown => "result shown",
            Self::ProductBrowsing => "product browsing",
        }
    }

    /// Screens that belong to a mounted analysis screen.
    #[must_use]
    pub const fn is_analysis(self) -> bool {
        matches!(
            self,
            Self::CaptureReady
                | Self::CaptureComplete
                | Self::AnalysisPending
                | Self::ResultShown
                | Self::ProductBrowsing
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one analysis run within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisRunId(u64);

impl AnalysisRunId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Result of asking to analyse the captured photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStart {
    /// A new run is pending; its result arrives after the analysis delay.
    Scheduled(AnalysisRunId),
    /// This screen already produced a diagnosis; it is shown again as is.
    AlreadyDiagnosed(DiagnosisCategory),
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: Screen, action: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// State owned by the active screen.
///
/// Fields are private; every change goes through a named transition that
/// either applies completely or leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    screen: Screen,
    is_authenticated: bool,
    captured_image: Option<CapturedImage>,
    selected_diagnosis: Option<DiagnosisCategory>,
    error_message: Option<String>,
    pending_run: Option<AnalysisRunId>,
    runs_started: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: Screen::Unauthenticated,
            is_authenticated: false,
            captured_image: None,
            selected_diagnosis: None,
            error_message: None,
            pending_run: None,
            runs_started: 0,
        }
    }

    pub const fn screen(&self) -> Screen {
        self.screen
    }

    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub const fn captured_image(&self) -> Option<&CapturedImage> {
        self.captured_image.as_ref()
    }

    pub const fn selected_diagnosis(&self) -> Option<DiagnosisCategory> {
        self.selected_diagnosis
    }

    /// Catalog record for the stored diagnosis, if any.
    pub fn diagnosis_record(&self) -> Option<&'static DiagnosisRecord> {
        self.selected_diagnosis.map(lookup)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub const fn pending_run(&self) -> Option<AnalysisRunId> {
        self.pending_run
    }

    /// Whether `run` is the analysis this state is currently waiting on.
    pub fn is_pending(&self, run: AnalysisRunId) -> bool {
        self.screen == Screen::AnalysisPending && self.pending_run == Some(run)
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Guard for starting a sign-in attempt.
    pub fn ensure_signed_out(&self, action: &'static str) -> Result<(), FlowError> {
        self.expect_screen(&[Screen::Unauthenticated], action)
    }

    pub fn sign_in_succeeded(&mut self) -> Result<(), FlowError> {
        self.ensure_signed_out("sign in")?;
        self.screen = Screen::Authenticated;
        self.is_authenticated = true;
        self.error_message = None;
        Ok(())
    }

    /// Failed attempts stay signed out and surface the provider's message.
    pub fn sign_in_failed(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        self.expect_screen(&[Screen::Unauthenticated], "report a sign-in failure")?;
        self.error_message = Some(message.into());
        Ok(())
    }

    pub fn open_analysis(&mut self) -> Result<(), FlowError> {
        self.expect_screen(&[Screen::Authenticated], "open the analysis screen")?;
        self.screen = Screen::CaptureReady;
        self.error_message = None;
        Ok(())
    }

    /// Guard for asking the photo source, checked before it is presented.
    pub fn ensure_can_capture(&self) -> Result<(), FlowError> {
        self.expect_screen(
            &[Screen::CaptureReady, Screen::CaptureComplete],
            "capture a photo",
        )
    }

    /// Apply the photo source's answer. `None` (cancelled) changes nothing.
    ///
    /// Returns whether an image was stored.
    pub fn capture_completed(&mut self, image: Option<CapturedImage>) -> Result<bool, FlowError> {
        self.ensure_can_capture()?;
        let Some(image) = image else {
            return Ok(false);
        };
        self.captured_image = Some(image);
        self.screen = Screen::CaptureComplete;
        self.error_message = None;
        Ok(true)
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisStart, FlowError> {
        self.expect_screen(
            &[Screen::CaptureReady, Screen::CaptureComplete],
            "start an analysis",
        )?;
        if self.captured_image.is_none() {
            let error = ValidationError::PhotoRequired;
            self.error_message = Some(error.to_string());
            return Err(error.into());
        }

        self.error_message = None;
        if let Some(category) = self.selected_diagnosis {
            self.screen = Screen::ResultShown;
            return Ok(AnalysisStart::AlreadyDiagnosed(category));
        }

        self.runs_started += 1;
        let run = AnalysisRunId(self.runs_started);
        self.pending_run = Some(run);
        self.screen = Screen::AnalysisPending;
        Ok(AnalysisStart::Scheduled(run))
    }

    /// Store the outcome of `run`. The diagnosis is written once per screen
    /// instance and never replaced.
    pub fn complete_analysis(
        &mut self,
        run: AnalysisRunId,
        category: DiagnosisCategory,
    ) -> Result<(), FlowError> {
        if !self.is_pending(run) {
            return Err(self.invalid("complete an analysis that is not pending"));
        }
        self.pending_run = None;
        self.selected_diagnosis.get_or_insert(category);
        self.screen = Screen::ResultShown;
        Ok(())
    }

    pub fn browse_products(&mut self) -> Result<&'static DiagnosisRecord, FlowError> {
        self.expect_screen(&[Screen::ResultShown], "browse products")?;
        let record = self
            .diagnosis_record()
            .ok_or_else(|| self.invalid("browse products without a diagnosis"))?;
        self.screen = Screen::ProductBrowsing;
        Ok(record)
    }

    /// Pop one level and return the screen now shown.
    pub fn back(&mut self) -> Screen {
        match self.screen {
            Screen::Unauthenticated => {}
            Screen::Authenticated => self.sign_out(),
            Screen::CaptureReady | Screen::CaptureComplete => self.leave_analysis(),
            Screen::AnalysisPending => {
                self.pending_run = None;
                self.screen = Screen::CaptureComplete;
            }
            Screen::ResultShown => self.screen = Screen::CaptureComplete,
            Screen::ProductBrowsing => self.screen = Screen::ResultShown,
        }
        self.screen
    }

    pub fn sign_out(&mut self) {
        *self = Self {
            runs_started: self.runs_started,
            ..Self::new()
        };
    }

    fn leave_analysis(&mut self) {
        self.captured_image = None;
        self.selected_diagnosis = None;
        self.pending_run = None;
        self.error_message = None;
        self.screen = Screen::Authenticated;
    }

    fn expect_screen(&self, allowed: &[Screen], action: &'static str) -> Result<(), FlowError> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    const fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            from: self.screen,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn photo() -> CapturedImage {
        CapturedImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10])
    }

    fn capture_ready() -> SessionState {
        let mut state = SessionState::new();
        state.sign_in_succeeded().unwrap();
        state.open_analysis().unwrap();
        state
    }

    fn with_result(category: DiagnosisCategory) -> SessionState {
        let mut state = capture_ready();
        state.capture_completed(Some(photo())).unwrap();
        let AnalysisStart::Scheduled(run) = state.begin_analysis().unwrap() else {
            panic!("expected a scheduled run");
        };
        state.complete_analysis(run, category).unwrap();
        state
    }

    #[test]
    fn starts_signed_out() {
        let state = SessionState::new();
        assert_eq!(state.screen(), Screen::Unauthenticated);
        assert!(!state.is_authenticated());
        assert!(state.captured_image().is_none());
        assert!(state.selected_diagnosis().is_none());
    }

    #[test]
    fn failed_sign_in_keeps_state_and_surfaces_message() {
        let mut state = SessionState::new();
        state.sign_in_failed("The password is invalid.").unwrap();
        assert_eq!(state.screen(), Screen::Unauthenticated);
        assert_eq!(state.error_message(), Some("The password is invalid."));

        state.sign_in_succeeded().unwrap();
        assert_eq!(state.screen(), Screen::Authenticated);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn cancelled_capture_changes_nothing() {
        let mut state = capture_ready();
        let before = state.clone();
        assert!(!state.capture_completed(None).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn analyze_without_photo_is_rejected() {
        let mut state = capture_ready();
        let error = state.begin_analysis().unwrap_err();
        assert_eq!(error.to_string(), "Please upload a photo first to analyze.");
        assert_eq!(state.screen(), Screen::CaptureReady);
        assert_eq!(
            state.error_message(),
            Some("Please upload a photo first to analyze.")
        );
        assert_eq!(state.pending_run(), None);
    }

    #[test]
    fn recapture_replaces_the_image() {
        let mut state = capture_ready();
        state.capture_completed(Some(photo())).unwrap();
        let replacement = CapturedImage::from_bytes(vec![1, 2, 3]);
        state.capture_completed(Some(replacement.clone())).unwrap();
        assert_eq!(state.captured_image(), Some(&replacement));
        assert_eq!(state.screen(), Screen::CaptureComplete);
    }

    #[test]
    fn stale_run_cannot_complete() {
        let mut state = capture_ready();
        state.capture_completed(Some(photo())).unwrap();
        let AnalysisStart::Scheduled(first) = state.begin_analysis().unwrap() else {
            panic!("expected a scheduled run");
        };
        assert_eq!(state.back(), Screen::CaptureComplete);

        let AnalysisStart::Scheduled(second) = state.begin_analysis().unwrap() else {
            panic!("expected a scheduled run");
        };
        assert_ne!(first, second);
        assert!(!state.is_pending(first));
        assert!(state
            .complete_analysis(first, DiagnosisCategory::Dryness)
            .is_err());
        assert_eq!(state.screen(), Screen::AnalysisPending);

        state
            .complete_analysis(second, DiagnosisCategory::OilySkin)
            .unwrap();
        assert_eq!(state.selected_diagnosis(), Some(DiagnosisCategory::OilySkin));
    }

    #[test]
    fn browsing_and_back_keep_the_diagnosis() {
        let mut state = with_result(DiagnosisCategory::Dryness);
        let record = state.browse_products().unwrap();
        assert_eq!(record, lookup(DiagnosisCategory::Dryness));
        assert_eq!(state.screen(), Screen::ProductBrowsing);

        assert_eq!(state.back(), Screen::ResultShown);
        assert_eq!(state.selected_diagnosis(), Some(DiagnosisCategory::Dryness));

        assert_eq!(state.back(), Screen::CaptureComplete);
        assert_eq!(state.selected_diagnosis(), Some(DiagnosisCategory::Dryness));
    }

    #[test]
    fn reanalysis_in_same_screen_reuses_diagnosis() {
        let mut state = with_result(DiagnosisCategory::DarkSpots);
        state.back();
        assert_eq!(
            state.begin_analysis().unwrap(),
            AnalysisStart::AlreadyDiagnosed(DiagnosisCategory::DarkSpots)
        );
        assert_eq!(state.screen(), Screen::ResultShown);
        assert_eq!(state.pending_run(), None);
    }

    #[test]
    fn leaving_the_analysis_screen_discards_its_state() {
        let mut state = with_result(DiagnosisCategory::Sensitivity);
        state.back();
        assert_eq!(state.back(), Screen::Authenticated);
        assert!(state.captured_image().is_none());
        assert!(state.selected_diagnosis().is_none());
        assert!(state.is_authenticated());

        assert_eq!(state.back(), Screen::Unauthenticated);
        assert!(!state.is_authenticated());
        assert_eq!(state.back(), Screen::Unauthenticated);
    }

    #[test]
    fn out_of_order_transitions_leave_state_untouched() {
        let mut state = SessionState::new();
        let before = state.clone();
        assert!(matches!(
            state.open_analysis(),
            Err(FlowError::InvalidTransition {
                from: Screen::Unauthenticated,
                ..
            })
        ));
        assert!(state.browse_products().is_err());
        assert!(state.capture_completed(Some(photo())).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn invalid_transition_message_names_the_screen() {
        let mut state = SessionState::new();
        let error = state.browse_products().unwrap_err();
        assert_eq!(error.to_string(), "Cannot browse products while unauthenticated");
    }
}
