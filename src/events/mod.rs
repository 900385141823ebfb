// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Achievements
    AchievementUnlocked,
    // Challenges
    ChallengeCompleted,
    ChallengeStarted,
    GuessJudged,
    // Persistence
    PersistenceFailed,
    // Recipes
    RecipeAdded,
    RecipeRemoved,
    RecipeUpdated,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
