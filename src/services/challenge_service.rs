// src/services/challenge_service.rs
//
// Challenge Service - memory quiz orchestration
//
// - Builds the pool from the recipes the player selected
// - Keeps live sessions addressable by id for the UI layer
// - Emits GuessJudged / ChallengeCompleted for the badge ledger

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::domain::quiz::{JudgeMode, QuizOption, QuizSession, QuizState};
use crate::domain::{DomainError, DomainResult};
use crate::error::{AppError, AppResult};
use crate::events::{ChallengeCompleted, ChallengeStarted, EventBus, GuessJudged};
use crate::services::deferred_advance::DeferredAdvance;
use crate::services::recipe_service::RecipeService;

/// A session shared between the service and any deferred advance
pub type SharedSession = Arc<Mutex<QuizSession>>;

/// What the challenge screen renders. Never reveals the expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSnapshot {
    pub session_id: Uuid,
    pub state: QuizState,
    pub judge_mode: JudgeMode,
    /// Ingredient text of the recipe on screen; `None` once complete
    pub ingredients: Option<String>,
    pub options: Vec<QuizOption>,
    pub last_guess_correct: Option<bool>,
    pub steps_completed: usize,
    pub pool_size: usize,
    pub mistakes: u32,
}

impl ChallengeSnapshot {
    fn of(session: &QuizSession) -> Self {
        Self {
            session_id: session.id(),
            state: session.state(),
            judge_mode: session.mode(),
            ingredients: session.current().map(|r| r.ingredients.clone()),
            options: session.options(),
            last_guess_correct: session.last_guess_correct(),
            steps_completed: session.steps_completed(),
            pool_size: session.pool_len(),
            mistakes: session.mistakes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub correct: bool,
    pub snapshot: ChallengeSnapshot,
}

pub struct ChallengeService {
    recipe_service: Arc<RecipeService>,
    event_bus: Arc<EventBus>,
    config: QuizConfig,
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl ChallengeService {
    pub fn new(
        recipe_service: Arc<RecipeService>,
        event_bus: Arc<EventBus>,
        config: QuizConfig,
    ) -> Self {
        Self {
            recipe_service,
            event_bus,
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Starts a session over the selected recipes, in selection order.
    /// If none of the ids resolve the session is complete from the start.
    pub fn start_challenge(&self, selected_ids: &[Uuid]) -> ChallengeSnapshot {
        let pool = self.recipe_service.select(selected_ids);
        if pool.len() < selected_ids.len() {
            log::debug!(
                "{} of {} selected recipes resolved",
                pool.len(),
                selected_ids.len()
            );
        }

        let session = QuizSession::start_with_mode(pool, self.config.judge_mode);
        let snapshot = ChallengeSnapshot::of(&session);

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id(), Arc::new(Mutex::new(session)));

        log::info!(
            "Challenge {} started with {} recipes",
            snapshot.session_id,
            snapshot.pool_size
        );
        self.event_bus
            .emit(ChallengeStarted::new(snapshot.session_id, snapshot.pool_size));

        snapshot
    }

    pub fn submit_guess(&self, session_id: Uuid, candidate_id: Uuid) -> AppResult<GuessOutcome> {
        self.judge(session_id, |session| session.submit_guess(candidate_id))
    }

    /// Free-text mode; only valid for sessions started in `JudgeMode::Name`.
    pub fn submit_name_guess(&self, session_id: Uuid, candidate_name: &str) -> AppResult<GuessOutcome> {
        self.judge(session_id, |session| session.submit_name_guess(candidate_name))
    }

    /// Applies the last judgment right away.
    pub fn advance(&self, session_id: Uuid) -> AppResult<ChallengeSnapshot> {
        let session = self.session(session_id)?;
        advance_when(&session, &self.event_bus, |_| true)?;
        Ok(snapshot_of(&session))
    }

    /// Applies the last judgment after the configured pause.
    /// Needs a running tokio runtime.
    pub fn schedule_advance(&self, session_id: Uuid) -> AppResult<DeferredAdvance> {
        let session = self.session(session_id)?;
        DeferredAdvance::schedule(
            &session,
            Arc::clone(&self.event_bus),
            self.config.advance_delay(),
        )
    }

    pub fn snapshot(&self, session_id: Uuid) -> AppResult<ChallengeSnapshot> {
        Ok(snapshot_of(&self.session(session_id)?))
    }

    /// Ingredient items of the recipe on screen, shuffled for display.
    pub fn shuffled_ingredients<R: Rng + ?Sized>(
        &self,
        session_id: Uuid,
        rng: &mut R,
    ) -> AppResult<Vec<String>> {
        let session = self.session(session_id)?;
        let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.shuffled_ingredients(rng))
    }

    /// Tears the session down. Pending deferred advances become no-ops.
    ///
    /// Sessions stay registered after they complete so the result screen can
    /// still read them; this is the only way a session is released.
    pub fn end_challenge(&self, session_id: Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id)
            .is_some();
        if removed {
            log::info!("Challenge {} closed", session_id);
        }
        removed
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn judge<F>(&self, session_id: Uuid, guess: F) -> AppResult<GuessOutcome>
    where
        F: FnOnce(&mut QuizSession) -> DomainResult<bool>,
    {
        let session = self.session(session_id)?;
        let (correct, recipe_id, snapshot) = {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            let recipe_id = guard.current().map(|r| r.id).ok_or_else(|| {
                AppError::Domain(DomainError::InvalidStateTransition(
                    "Challenge is already complete".to_string(),
                ))
            })?;
            let correct = guess(&mut *guard)?;
            (correct, recipe_id, ChallengeSnapshot::of(&guard))
        };

        log::debug!("Challenge {} guess judged: correct={}", session_id, correct);
        self.event_bus
            .emit(GuessJudged::new(session_id, recipe_id, correct));

        Ok(GuessOutcome { correct, snapshot })
    }

    fn session(&self, session_id: Uuid) -> AppResult<SharedSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&session_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }
}

/// Advances a shared session when `ready` holds under the session lock, and
/// reports completion. Returns `None` when `ready` declined. Used by both the
/// immediate and the deferred path.
pub(crate) fn advance_when<P>(
    session: &SharedSession,
    event_bus: &EventBus,
    ready: P,
) -> DomainResult<Option<QuizState>>
where
    P: FnOnce(&QuizSession) -> bool,
{
    let (state, completed) = {
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        if !ready(&guard) {
            return Ok(None);
        }
        let state = guard.advance()?;
        let completed = (state == QuizState::Complete)
            .then(|| ChallengeCompleted::new(guard.id(), guard.pool_len(), guard.mistakes()));
        (state, completed)
    };

    if let Some(event) = completed {
        log::info!(
            "Challenge {} completed ({} recipes, {} mistakes)",
            event.session_id,
            event.pool_size,
            event.mistakes
        );
        event_bus.emit(event);
    }

    Ok(Some(state))
}

fn snapshot_of(session: &SharedSession) -> ChallengeSnapshot {
    let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
    ChallengeSnapshot::of(&guard)
}
