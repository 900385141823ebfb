// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AchievementId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($ty:ident) => {
        impl DomainEvent for $ty {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($ty) }
        }
    };
}

// ============================================================================
// RECIPE EVENTS
// ============================================================================

/// Emitted after a recipe joins the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub recipe_id: Uuid,
    pub name: String,
    /// Collection size after the add
    pub total_recipes: usize,
}

impl RecipeAdded {
    pub fn new(recipe_id: Uuid, name: String, total_recipes: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            recipe_id,
            name,
            total_recipes,
        }
    }
}

impl_domain_event!(RecipeAdded);

/// Emitted after a recipe was replaced wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub recipe_id: Uuid,
}

impl RecipeUpdated {
    pub fn new(recipe_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            recipe_id,
        }
    }
}

impl_domain_event!(RecipeUpdated);

/// Emitted after a recipe left the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub recipe_id: Uuid,
    pub total_recipes: usize,
}

impl RecipeRemoved {
    pub fn new(recipe_id: Uuid, total_recipes: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            recipe_id,
            total_recipes,
        }
    }
}

impl_domain_event!(RecipeRemoved);

// ============================================================================
// CHALLENGE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub pool_size: usize,
}

impl ChallengeStarted {
    pub fn new(session_id: Uuid, pool_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            pool_size,
        }
    }
}

impl_domain_event!(ChallengeStarted);

/// Emitted for every judged guess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessJudged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub recipe_id: Uuid,
    pub correct: bool,
}

impl GuessJudged {
    pub fn new(session_id: Uuid, recipe_id: Uuid, correct: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            recipe_id,
            correct,
        }
    }
}

impl_domain_event!(GuessJudged);

/// Emitted when an advance exhausts the pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub pool_size: usize,
    pub mistakes: u32,
}

impl ChallengeCompleted {
    pub fn new(session_id: Uuid, pool_size: usize, mistakes: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            pool_size,
            mistakes,
        }
    }
}

impl_domain_event!(ChallengeCompleted);

// ============================================================================
// ACHIEVEMENT EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementUnlocked {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub achievement_id: AchievementId,
    pub title: String,
}

impl AchievementUnlocked {
    pub fn new(achievement_id: AchievementId, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            achievement_id,
            title,
        }
    }
}

impl_domain_event!(AchievementUnlocked);

// ============================================================================
// PERSISTENCE EVENTS
// ============================================================================

/// Emitted when a collection could not be written.
/// The in-memory state already reflects the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// "recipes" or "achievements"
    pub collection: String,
    pub reason: String,
}

impl PersistenceFailed {
    pub fn new(collection: &str, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            collection: collection.to_string(),
            reason,
        }
    }
}

impl_domain_event!(PersistenceFailed);
