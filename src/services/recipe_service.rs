// src/services/recipe_service.rs
//
// Recipe collection: the in-memory source of truth for the library screen
// and the challenge picker. Every mutation writes the whole collection.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::recipe::{validate_recipe, Recipe};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, PersistenceFailed, RecipeAdded, RecipeRemoved, RecipeUpdated};
use crate::repositories::RecipeRepository;

const COLLECTION: &str = "recipes";

#[derive(Debug, Clone, Default)]
pub struct CreateRecipeRequest {
    /// Caller-supplied identifier; a fresh one is generated when absent
    pub id: Option<Uuid>,
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
    pub image_data: Option<Vec<u8>>,
}

pub struct RecipeService {
    recipe_repo: Arc<dyn RecipeRepository>,
    event_bus: Arc<EventBus>,
    recipes: RwLock<Vec<Recipe>>,
}

impl RecipeService {
    /// Loads the stored collection. Missing or unreadable data starts empty.
    pub fn load(recipe_repo: Arc<dyn RecipeRepository>, event_bus: Arc<EventBus>) -> Self {
        let recipes = match recipe_repo.load() {
            Ok(Some(recipes)) => {
                log::info!("Loaded {} recipes", recipes.len());
                recipes
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Stored recipes could not be read, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            recipe_repo,
            event_bus,
            recipes: RwLock::new(recipes),
        }
    }

    pub fn add(&self, request: CreateRecipeRequest) -> AppResult<Uuid> {
        let recipe = Recipe::with_id(
            request.id.unwrap_or_else(Uuid::new_v4),
            request.name,
            request.ingredients,
            request.procedure,
        )
        .with_image(request.image_data);

        validate_recipe(&recipe).map_err(AppError::Domain)?;

        let (total, saved) = {
            let mut recipes = self.write_recipes();
            if recipes.iter().any(|r| r.id == recipe.id) {
                return Err(AppError::Domain(DomainError::DuplicateId(recipe.id)));
            }
            recipes.push(recipe.clone());
            (recipes.len(), self.recipe_repo.save(&recipes))
        };

        log::info!("Added recipe {} ({})", recipe.name, recipe.id);
        self.report_persist(saved);
        self.event_bus
            .emit(RecipeAdded::new(recipe.id, recipe.name.clone(), total));

        Ok(recipe.id)
    }

    /// Full replacement of the recipe with the same id.
    pub fn replace(&self, recipe: Recipe) -> AppResult<()> {
        validate_recipe(&recipe).map_err(AppError::Domain)?;

        let saved = {
            let mut recipes = self.write_recipes();
            let slot = recipes
                .iter_mut()
                .find(|r| r.id == recipe.id)
                .ok_or(AppError::NotFound)?;
            *slot = recipe.clone();
            self.recipe_repo.save(&recipes)
        };

        log::info!("Replaced recipe {}", recipe.id);
        self.report_persist(saved);
        self.event_bus.emit(RecipeUpdated::new(recipe.id));
        Ok(())
    }

    /// Removes the recipe if present. Returns false (and writes nothing) when absent.
    pub fn remove(&self, id: Uuid) -> AppResult<bool> {
        let (total, saved) = {
            let mut recipes = self.write_recipes();
            let Some(index) = recipes.iter().position(|r| r.id == id) else {
                log::debug!("Remove ignored, no recipe {}", id);
                return Ok(false);
            };
            recipes.remove(index);
            (recipes.len(), self.recipe_repo.save(&recipes))
        };

        log::info!("Removed recipe {}", id);
        self.report_persist(saved);
        self.event_bus.emit(RecipeRemoved::new(id, total));
        Ok(true)
    }

    /// All recipes in insertion order
    pub fn list(&self) -> Vec<Recipe> {
        self.read_recipes().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Recipe> {
        self.read_recipes().iter().find(|r| r.id == id).cloned()
    }

    pub fn count(&self) -> usize {
        self.read_recipes().len()
    }

    /// Recipes for `ids` in selection order. Unknown ids are dropped,
    /// repeated ids appear once.
    pub fn select(&self, ids: &[Uuid]) -> Vec<Recipe> {
        let recipes = self.read_recipes();
        let mut selected: Vec<Recipe> = Vec::with_capacity(ids.len());
        for id in ids {
            if selected.iter().any(|r| r.id == *id) {
                continue;
            }
            if let Some(recipe) = recipes.iter().find(|r| r.id == *id) {
                selected.push(recipe.clone());
            }
        }
        selected
    }

    fn report_persist(&self, saved: AppResult<()>) {
        if let Err(e) = saved {
            log::warn!("Recipe collection was not persisted: {}", e);
            self.event_bus
                .emit(PersistenceFailed::new(COLLECTION, e.to_string()));
        }
    }

    fn read_recipes(&self) -> RwLockReadGuard<'_, Vec<Recipe>> {
        self.recipes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_recipes(&self) -> RwLockWriteGuard<'_, Vec<Recipe>> {
        self.recipes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{KeyValueRecipeRepository, MockRecipeRepository};
    use crate::storage::{KeyValueStore, MemoryStore, RECIPES_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(name: &str, ingredients: &str) -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            ..Default::default()
        }
    }

    fn service_over(store: Arc<MemoryStore>) -> RecipeService {
        RecipeService::load(
            Arc::new(KeyValueRecipeRepository::new(store)),
            Arc::new(EventBus::new()),
        )
    }

    #[test]
    fn test_add_then_get_returns_same_fields() {
        let service = service_over(Arc::new(MemoryStore::new()));
        let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x10];

        let id = service
            .add(CreateRecipeRequest {
                id: None,
                name: "Carbonara".to_string(),
                ingredients: "Pasta, Eggs, Pecorino Cheese, Guanciale, Pepper".to_string(),
                procedure: "Mix eggs and cheese off the heat".to_string(),
                image_data: Some(image.clone()),
            })
            .unwrap();

        let recipe = service.get(id).unwrap();
        assert_eq!(recipe.name, "Carbonara");
        assert_eq!(recipe.ingredients, "Pasta, Eggs, Pecorino Cheese, Guanciale, Pepper");
        assert_eq!(recipe.procedure, "Mix eggs and cheese off the heat");
        assert_eq!(recipe.image_data, Some(image));
    }

    #[test]
    fn test_supplied_id_is_kept_and_duplicates_rejected() {
        let service = service_over(Arc::new(MemoryStore::new()));
        let id = Uuid::new_v4();

        let first = CreateRecipeRequest { id: Some(id), ..request("Pizza", "Dough") };
        assert_eq!(service.add(first.clone()).unwrap(), id);

        let result = service.add(first);
        assert!(matches!(result, Err(AppError::Domain(DomainError::DuplicateId(dup))) if dup == id));
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let service = service_over(Arc::new(MemoryStore::new()));
        let a = service.add(request("Pasta", "Pasta")).unwrap();
        let b = service.add(request("Pasta", "Pasta, Basil")).unwrap();
        assert_ne!(a, b);
        assert_eq!(service.count(), 2);
    }

    #[test]
    fn test_blank_name_is_rejected_without_write() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());
        assert!(service.add(request("  ", "Pasta")).is_err());
        assert!(store.read(RECIPES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reload_yields_equal_collection_in_order() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());
        for name in ["Carbonara", "Amatriciana", "Cacio e Pepe", "Gricia"] {
            service.add(request(name, "Pasta, Pecorino Cheese")).unwrap();
        }

        let reloaded = service_over(store);
        assert_eq!(reloaded.list(), service.list());
    }

    #[test]
    fn test_remove_unknown_id_leaves_stored_bytes_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());
        service.add(request("Gricia", "Pasta, Guanciale")).unwrap();
        let before = store.read(RECIPES_KEY).unwrap();

        assert!(!service.remove(Uuid::new_v4()).unwrap());

        assert_eq!(store.read(RECIPES_KEY).unwrap(), before);
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_remove_existing_persists() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());
        let id = service.add(request("Gricia", "Pasta")).unwrap();

        assert!(service.remove(id).unwrap());
        assert!(service.get(id).is_none());
        assert!(service_over(store).list().is_empty());
    }

    #[test]
    fn test_replace_swaps_whole_record() {
        let service = service_over(Arc::new(MemoryStore::new()));
        let id = service.add(request("Pizza", "Dough")).unwrap();

        let mut updated = service.get(id).unwrap();
        updated.ingredients = "Dough, Tomato, Cheese".to_string();
        service.replace(updated.clone()).unwrap();
        assert_eq!(service.get(id), Some(updated));

        let stranger = Recipe::new("Risotto".into(), "Rice".into(), String::new());
        assert!(matches!(service.replace(stranger), Err(AppError::NotFound)));
    }

    #[test]
    fn test_select_keeps_selection_order() {
        let service = service_over(Arc::new(MemoryStore::new()));
        let a = service.add(request("A", "1")).unwrap();
        let b = service.add(request("B", "2")).unwrap();
        let c = service.add(request("C", "3")).unwrap();

        let picked = service.select(&[c, Uuid::new_v4(), a, c]);
        let ids: Vec<Uuid> = picked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c, a]);
        assert!(!ids.contains(&b));
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store.write(RECIPES_KEY, b"\x00garbage").unwrap();
        assert!(service_over(store).list().is_empty());
    }

    #[test]
    fn test_persist_failure_keeps_change_and_emits_event() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_load().returning(|| Ok(None));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let bus = Arc::new(EventBus::new());
        let failures = Arc::new(AtomicUsize::new(0));
        let failures_clone = Arc::clone(&failures);
        bus.subscribe::<PersistenceFailed, _>(move |event| {
            assert_eq!(event.collection, "recipes");
            failures_clone.fetch_add(1, Ordering::SeqCst);
        });

        let service = RecipeService::load(Arc::new(repo), bus);
        let id = service.add(request("Pizza", "Dough")).unwrap();

        assert!(service.get(id).is_some());
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }
}
