// src/repositories/recipe_repository.rs

use std::sync::Arc;

use crate::domain::recipe::Recipe;
use crate::error::AppResult;
use crate::storage::{KeyValueStore, RECIPES_KEY};

/// Whole-collection persistence for recipes.
///
/// `load` returns `Ok(None)` when nothing was ever stored and an error when
/// stored data cannot be decoded. Callers decide what a default looks like.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeRepository: Send + Sync {
    fn load(&self) -> AppResult<Option<Vec<Recipe>>>;
    fn save(&self, recipes: &[Recipe]) -> AppResult<()>;
}

/// JSON array blob under the `recipes` key
pub struct KeyValueRecipeRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueRecipeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl RecipeRepository for KeyValueRecipeRepository {
    fn load(&self) -> AppResult<Option<Vec<Recipe>>> {
        match self.store.read(RECIPES_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, recipes: &[Recipe]) -> AppResult<()> {
        let bytes = serde_json::to_vec(recipes)?;
        self.store.write(RECIPES_KEY, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_key_loads_none() {
        let repo = KeyValueRecipeRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_preserves_order_and_image() {
        let store = Arc::new(MemoryStore::new());
        let repo = KeyValueRecipeRepository::new(store.clone());

        let recipes = vec![
            Recipe::new("Pasta".into(), "Pasta, Tomato Sauce".into(), "Boil pasta, add sauce".into()),
            Recipe::new("Pizza".into(), "Dough, Tomato, Cheese".into(), "Bake with toppings".into())
                .with_image(Some(vec![0xFF, 0xD8, 0xFF, 0xE1, 0x42])),
        ];
        repo.save(&recipes).unwrap();

        let loaded = KeyValueRecipeRepository::new(store).load().unwrap().unwrap();
        assert_eq!(loaded, recipes);
    }

    #[test]
    fn test_corrupt_blob_is_a_serialization_error() {
        let store = Arc::new(MemoryStore::new());
        store.write(RECIPES_KEY, b"{not json").unwrap();

        let repo = KeyValueRecipeRepository::new(store);
        assert!(matches!(repo.load(), Err(AppError::Serialization(_))));
    }
}
