//! Screen controller: one control path for user actions, collaborator
//! results and timer expiry.

use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::state::{AnalysisRunId, AnalysisStart, FlowError, Screen, SessionState};
use super::timer::{AnalysisTimer, ANALYSIS_DELAY};
use super::PhotoSource;
use crate::auth::{AuthSession, FederatedCredential, IdentityProvider};
use crate::models::{CapturedImage, DiagnosisCategory, DiagnosisRecord, ImageSource};
use crate::outcome::{OutcomeSource, RandomOutcome};

/// Events queued for the owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    AnalysisElapsed(AnalysisRunId),
}

pub struct ScreenController<O: OutcomeSource = RandomOutcome> {
    state: SessionState,
    session: Option<AuthSession>,
    outcome: O,
    delay: Duration,
    timer: Option<AnalysisTimer>,
    events_tx: UnboundedSender<ScreenEvent>,
    events_rx: UnboundedReceiver<ScreenEvent>,
}

impl ScreenController<RandomOutcome> {
    /// Controller with OS-seeded random outcomes.
    #[must_use]
    pub fn random() -> Self {
        Self::new(RandomOutcome::from_os_rng())
    }
}

impl<O: OutcomeSource> ScreenController<O> {
    pub fn new(outcome: O) -> Self {
        Self::with_delay(outcome, ANALYSIS_DELAY)
    }

    pub fn with_delay(outcome: O, delay: Duration) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state: SessionState::new(),
            session: None,
            outcome,
            delay,
            timer: None,
            events_tx,
            events_rx,
        }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    pub async fn sign_in<P: IdentityProvider>(
        &mut self,
        provider: &P,
        email: &str,
        password: &str,
    ) -> Result<(), FlowError> {
        self.state.ensure_signed_out("sign in")?;
        let result = provider.sign_in(email.trim(), password).await;
        self.apply_sign_in(result)
    }

    pub async fn sign_in_federated<P: IdentityProvider>(
        &mut self,
        provider: &P,
        credential: &FederatedCredential,
    ) -> Result<(), FlowError> {
        self.state.ensure_signed_out("sign in")?;
        let result = provider.federated_sign_in(credential).await;
        self.apply_sign_in(result)
    }

    /// Enter the app with a session obtained elsewhere (verified registration).
    pub fn accept_session(&mut self, session: AuthSession) -> Result<(), FlowError> {
        self.apply_sign_in(Ok(session))
    }

    pub fn open_analysis(&mut self) -> Result<(), FlowError> {
        self.state.open_analysis()
    }

    /// Ask the photo source for an image. Returns whether one was stored;
    /// cancellation is not an error.
    pub async fn capture<P: PhotoSource>(
        &mut self,
        photos: &P,
        source: ImageSource,
    ) -> Result<bool, FlowError> {
        self.state.ensure_can_capture()?;
        let image = photos.capture(source).await;
        if image.is_none() {
            tracing::debug!("Photo capture from {:?} was cancelled", source);
        }
        self.store_capture(image)
    }

    /// Apply a capture made outside the controller, e.g. a UI file picker.
    pub fn store_capture(&mut self, image: Option<CapturedImage>) -> Result<bool, FlowError> {
        self.state.capture_completed(image)
    }

    /// Start an analysis run; the result arrives as a queued event.
    pub fn analyze(&mut self) -> Result<AnalysisStart, FlowError> {
        let start = self.state.begin_analysis()?;
        if let AnalysisStart::Scheduled(run) = start {
            self.timer = Some(AnalysisTimer::schedule(run, self.delay, &self.events_tx));
        }
        Ok(start)
    }

    /// Wait for the next queued event.
    pub async fn next_event(&mut self) -> Option<ScreenEvent> {
        self.events_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<ScreenEvent> {
        self.events_rx.try_recv().ok()
    }

    pub const fn analysis_delay(&self) -> Duration {
        self.delay
    }

    /// Apply a queued event. Returns the diagnosis when it completed the
    /// pending run; events for cancelled runs are ignored.
    pub fn handle_event(&mut self, event: ScreenEvent) -> Result<Option<DiagnosisCategory>, FlowError> {
        match event {
            ScreenEvent::AnalysisElapsed(run) => {
                if !self.state.is_pending(run) {
                    tracing::debug!("Ignoring elapsed analysis run {}", run.get());
                    return Ok(None);
                }
                if self.timer.as_ref().is_some_and(|timer| timer.run() == run) {
                    self.timer = None;
                }
                let category = self.outcome.next_outcome();
                self.state.complete_analysis(run, category)?;
                tracing::info!("Analysis run {} finished: {}", run.get(), category);
                Ok(Some(category))
            }
        }
    }

    /// Drive the event queue until the pending analysis shows a result.
    pub async fn wait_for_result(&mut self) -> Result<DiagnosisCategory, FlowError> {
        loop {
            if self.state.screen() == Screen::ResultShown {
                if let Some(category) = self.state.selected_diagnosis() {
                    return Ok(category);
                }
            }
            if self.state.screen() != Screen::AnalysisPending {
                return Err(FlowError::InvalidTransition {
                    from: self.state.screen(),
                    action: "wait for an analysis result",
                });
            }
            let Some(event) = self.next_event().await else {
                return Err(FlowError::InvalidTransition {
                    from: self.state.screen(),
                    action: "wait for an analysis result",
                });
            };
            self.handle_event(event)?;
        }
    }

    pub fn browse_products(&mut self) -> Result<&'static DiagnosisRecord, FlowError> {
        self.state.browse_products()
    }

    /// Pop one level. Leaving the pending state cancels its timer.
    pub fn back(&mut self) -> Screen {
        let screen = self.state.back();
        if self.state.pending_run().is_none() {
            self.timer = None;
        }
        if !self.state.is_authenticated() {
            self.session = None;
        }
        screen
    }

    pub fn sign_out(&mut self) {
        self.timer = None;
        self.session = None;
        self.state.sign_out();
    }

    /// Apply a sign-in attempt made outside the controller.
    pub fn apply_sign_in(
        &mut self,
        result: Result<AuthSession, crate::auth::AuthError>,
    ) -> Result<(), FlowError> {
        match result {
            Ok(session) => {
                self.state.sign_in_succeeded()?;
                tracing::info!("User {} signed in", session.user.id);
                self.session = Some(session);
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Sign-in failed: {}", error);
                self.state.sign_in_failed(error.to_string())?;
                Err(error.into())
            }
        }
    }
}
