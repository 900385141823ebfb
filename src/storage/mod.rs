// src/storage/mod.rs
//
// Key-value storage collaborator
//
// RULES:
// - Values are opaque bytes; encoding belongs to the repositories
// - Writes replace the whole value, never patch it
// - A missing key is `Ok(None)`, not an error

pub mod file_store;
pub mod memory_store;
pub mod sqlite_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::error::AppResult;

/// Key holding the recipe collection
pub const RECIPES_KEY: &str = "recipes";

/// Key holding the achievement catalog state
pub const ACHIEVEMENTS_KEY: &str = "savedAchievements";

#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}
