// src/repositories/achievement_repository.rs

use std::sync::Arc;

use crate::domain::achievement::Achievement;
use crate::error::AppResult;
use crate::storage::{KeyValueStore, ACHIEVEMENTS_KEY};

#[cfg_attr(test, mockall::automock)]
pub trait AchievementRepository: Send + Sync {
    fn load(&self) -> AppResult<Option<Vec<Achievement>>>;
    fn save(&self, achievements: &[Achievement]) -> AppResult<()>;
}

/// JSON array blob under the `savedAchievements` key
pub struct KeyValueAchievementRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueAchievementRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl AchievementRepository for KeyValueAchievementRepository {
    fn load(&self) -> AppResult<Option<Vec<Achievement>>> {
        match self.store.read(ACHIEVEMENTS_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, achievements: &[Achievement]) -> AppResult<()> {
        let bytes = serde_json::to_vec(achievements)?;
        self.store.write(ACHIEVEMENTS_KEY, &bytes)
    }
}
