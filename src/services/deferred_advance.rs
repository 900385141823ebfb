// src/services/deferred_advance.rs
//
// The pause between "Correct!" and the next recipe. Scheduled by the caller;
// the quiz session itself never waits on a timer.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::{QuizSession, QuizState};
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::services::challenge_service::{advance_when, SharedSession};

/// Handle to a scheduled advance.
///
/// Dropping the handle does not cancel it; call [`DeferredAdvance::cancel`].
/// The advance applies only to the judgment on screen when it was scheduled.
/// If the session is torn down, advanced by hand, or judged again before the
/// delay elapses, it does nothing.
#[derive(Debug)]
pub struct DeferredAdvance {
    handle: JoinHandle<()>,
}

impl DeferredAdvance {
    pub(crate) fn schedule(
        session: &SharedSession,
        event_bus: Arc<EventBus>,
        delay: Duration,
    ) -> AppResult<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            AppError::Other(format!("No async runtime for deferred advance: {}", e))
        })?;

        let judgment = session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .attempts();

        let session = Arc::downgrade(session);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fire(session, judgment, &event_bus);
        });

        Ok(Self { handle })
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// `judgment` is the session's attempt count when the advance was scheduled;
/// any later guess makes the advance stale.
fn fire(session: Weak<Mutex<QuizSession>>, judgment: u32, event_bus: &EventBus) {
    let Some(session) = session.upgrade() else {
        log::debug!("Deferred advance skipped, session was closed");
        return;
    };

    let still_pending = |current: &QuizSession| {
        matches!(current.state(), QuizState::Judged { .. }) && current.attempts() == judgment
    };

    match advance_when(&session, event_bus, still_pending) {
        Ok(Some(_)) => {}
        Ok(None) => log::debug!("Deferred advance skipped, session already moved on"),
        Err(e) => log::warn!("Deferred advance failed: {}", e),
    }
}
