// src/repositories/sqlite/mod.rs
//
// Relational variants of the collection repositories

pub mod sqlite_recipe_repository;

pub use sqlite_recipe_repository::SqliteRecipeRepository;
