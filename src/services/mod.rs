// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod achievement_service;
pub mod challenge_service;
pub mod deferred_advance;
pub mod recipe_service;


// Re-export all services and their types
pub use achievement_service::AchievementService;

pub use challenge_service::{
    ChallengeService,
    ChallengeSnapshot,
    GuessOutcome,
    SharedSession,
};

pub use deferred_advance::DeferredAdvance;

pub use recipe_service::{
    CreateRecipeRequest,
    RecipeService,
};
