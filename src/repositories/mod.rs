// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Whole-collection load/save only

pub mod achievement_repository;
pub mod recipe_repository;
pub mod sqlite;

pub use achievement_repository::{AchievementRepository, KeyValueAchievementRepository};
pub use recipe_repository::{KeyValueRecipeRepository, RecipeRepository};
pub use sqlite::SqliteRecipeRepository;

#[cfg(test)]
pub use achievement_repository::MockAchievementRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
