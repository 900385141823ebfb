// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod achievement;
pub mod quiz;
pub mod recipe;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Recipe Domain
pub use recipe::{validate_recipe, ImageFormat, Recipe, RecipeImage};

// Achievement Domain
pub use achievement::{
    default_badge_rules, validate_catalog, Achievement, AchievementCatalog,
    AchievementDefinition, AchievementId, BadgeRule, BadgeTrigger,
};

// Quiz Domain
pub use quiz::{JudgeMode, QuizOption, QuizSession, QuizState};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Duplicate identifier: {0}")]
    DuplicateId(Uuid),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
