// src/lib.rs
// ICook - Local-first recipe library with a memory challenge
//
// Architecture:
// - Domain-centric: recipes, quiz sessions and badges own their invariants
// - Event-driven: the badge ledger reacts to app events, nobody calls it directly
// - Explicit: every collaborator is handed over at startup, no global state
// - Local-first: the whole collection lives on the user's device

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod storage;
pub mod telemetry;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    default_badge_rules,
    validate_catalog,
    validate_recipe,
    // Achievements
    Achievement,
    AchievementCatalog,
    AchievementDefinition,
    AchievementId,
    BadgeRule,
    BadgeTrigger,
    DomainError,
    DomainResult,
    // Recipes
    ImageFormat,
    // Quiz
    JudgeMode,
    QuizOption,
    QuizSession,
    QuizState,
    Recipe,
    RecipeImage,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{AchievementConfig, AppConfig, QuizConfig, StorageBackend, StorageConfig};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    AchievementUnlocked,
    ChallengeCompleted,
    ChallengeStarted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    GuessJudged,
    PersistenceFailed,
    RecipeAdded,
    RecipeRemoved,
    RecipeUpdated,
};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore, ACHIEVEMENTS_KEY, RECIPES_KEY};

pub use repositories::{
    AchievementRepository,
    KeyValueAchievementRepository,
    KeyValueRecipeRepository,
    RecipeRepository,
    SqliteRecipeRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AchievementService,
    ChallengeService,
    ChallengeSnapshot,
    CreateRecipeRequest,
    DeferredAdvance,
    GuessOutcome,
    RecipeService,
    SharedSession,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
