//! One-shot analysis delay.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::controller::ScreenEvent;
use super::state::AnalysisRunId;

/// How long the "analysis" takes before a result is shown.
pub const ANALYSIS_DELAY: Duration = Duration::from_secs(4);

/// Delivers [`ScreenEvent::AnalysisElapsed`] once `delay` has passed.
///
/// The task only holds a weak sender: when the owning screen's queue is gone
/// the upgrade fails and nothing is delivered. Dropping the timer aborts the
/// task. Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct AnalysisTimer {
    run: AnalysisRunId,
    handle: JoinHandle<()>,
}

impl AnalysisTimer {
    pub fn schedule(
        run: AnalysisRunId,
        delay: Duration,
        events: &UnboundedSender<ScreenEvent>,
    ) -> Self {
        let events = events.downgrade();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(events) = events.upgrade() else {
                tracing::debug!("Analysis run {} elapsed after its screen closed", run.get());
                return;
            };
            if events.send(ScreenEvent::AnalysisElapsed(run)).is_err() {
                tracing::debug!("Analysis run {} elapsed with no receiver", run.get());
            }
        });

        tracing::debug!("Scheduled analysis run {} in {:?}", run.get(), delay);
        Self { run, handle }
    }

    pub const fn run(&self) -> AnalysisRunId {
        self.run
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AnalysisTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
