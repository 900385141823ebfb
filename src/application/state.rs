// src/application/state.rs
//
// Application state shared by every command.
// All fields are Arc-wrapped; one instance per running app.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::config::{AppConfig, StorageBackend};
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    AchievementRepository, KeyValueAchievementRepository, KeyValueRecipeRepository,
    RecipeRepository, SqliteRecipeRepository,
};
use crate::services::{AchievementService, ChallengeService, DeferredAdvance, RecipeService};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};

pub const DATABASE_FILE: &str = "icook.db";

pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub recipe_service: Arc<RecipeService>,
    pub achievement_service: Arc<AchievementService>,
    pub challenge_service: Arc<ChallengeService>,
    pub config: AppConfig,
    /// At most one scheduled advance per challenge session
    pending_advances: Mutex<HashMap<Uuid, DeferredAdvance>>,
}

impl AppState {
    /// Builds storage, repositories and services in dependency order and
    /// subscribes the badge ledger to app events.
    pub fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        // ========================================================================
        // 1. STORAGE
        // ========================================================================
        let (recipe_repo, achievement_repo) = build_repositories(config)?;

        // ========================================================================
        // 2. EVENT BUS
        // ========================================================================
        let event_bus = Arc::new(EventBus::new());

        // ========================================================================
        // 3. SERVICES
        // ========================================================================
        let catalog = config.achievements.build_catalog()?;

        let achievement_service = Arc::new(AchievementService::initialize(
            achievement_repo,
            &catalog,
            Arc::clone(&event_bus),
        ));

        let recipe_service = Arc::new(RecipeService::load(recipe_repo, Arc::clone(&event_bus)));

        let challenge_service = Arc::new(ChallengeService::new(
            Arc::clone(&recipe_service),
            Arc::clone(&event_bus),
            config.quiz.clone(),
        ));

        // ========================================================================
        // 4. EVENT HANDLERS
        // ========================================================================
        achievement_service.register_event_handlers(&config.achievements.rules);

        log::info!(
            "Application ready: {} recipes, {}/{} badges unlocked",
            recipe_service.count(),
            achievement_service.unlocked_count(),
            achievement_service.list().len()
        );

        Ok(Self {
            event_bus,
            recipe_service,
            achievement_service,
            challenge_service,
            config: config.clone(),
            pending_advances: Mutex::new(HashMap::new()),
        })
    }

    /// Tracks a newly scheduled advance, cancelling the one it replaces.
    /// Advances that already fired are dropped on the way.
    pub fn track_advance(&self, session_id: Uuid, advance: DeferredAdvance) {
        let previous = {
            let mut pending = self
                .pending_advances
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            pending.retain(|_, scheduled| !scheduled.is_finished());
            pending.insert(session_id, advance)
        };
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Number of advances still waiting to fire
    pub fn pending_advance_count(&self) -> usize {
        let mut pending = self
            .pending_advances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.retain(|_, scheduled| !scheduled.is_finished());
        pending.len()
    }

    /// Cancels the scheduled advance for a session, if any.
    /// Returns true when an advance was still waiting to fire.
    pub fn cancel_advance(&self, session_id: Uuid) -> bool {
        let pending = self
            .pending_advances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id);
        match pending {
            Some(advance) if !advance.is_finished() => {
                advance.cancel();
                true
            }
            _ => false,
        }
    }
}

fn build_repositories(
    config: &AppConfig,
) -> AppResult<(Arc<dyn RecipeRepository>, Arc<dyn AchievementRepository>)> {
    match config.storage.backend {
        StorageBackend::Memory => {
            log::info!("Using in-memory storage");
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            Ok(key_value_repositories(store))
        }
        StorageBackend::File => {
            let data_dir = config.storage.resolve_data_dir()?;
            log::info!("Using file storage at {}", data_dir.display());
            let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(data_dir)?);
            Ok(key_value_repositories(store))
        }
        StorageBackend::Sqlite => {
            let db_path = config.storage.resolve_data_dir()?.join(DATABASE_FILE);
            log::info!("Using SQLite storage at {}", db_path.display());

            let pool = Arc::new(create_connection_pool(&db_path)?);
            {
                let conn = get_connection(&pool)?;
                initialize_database(&conn)?;
                verify_database_integrity(&conn)?;
            }

            let recipe_repo: Arc<dyn RecipeRepository> =
                Arc::new(SqliteRecipeRepository::new(Arc::clone(&pool)));
            let achievement_repo: Arc<dyn AchievementRepository> = Arc::new(
                KeyValueAchievementRepository::new(Arc::new(SqliteStore::new(pool))),
            );
            Ok((recipe_repo, achievement_repo))
        }
    }
}

fn key_value_repositories(
    store: Arc<dyn KeyValueStore>,
) -> (Arc<dyn RecipeRepository>, Arc<dyn AchievementRepository>) {
    (
        Arc::new(KeyValueRecipeRepository::new(Arc::clone(&store))),
        Arc::new(KeyValueAchievementRepository::new(store)),
    )
}
