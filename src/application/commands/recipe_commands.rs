// src/application/commands/recipe_commands.rs
//
// Recipe Command Handlers

use crate::application::commands::{decode_image, parse_id};
use crate::application::dto::{CreateRecipeDto, RecipeDto, UpdateRecipeDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::Recipe;
use crate::services::CreateRecipeRequest;

/// List all recipes in insertion order
pub fn list_recipes(state: &AppState) -> Result<Vec<RecipeDto>, String> {
    Ok(state
        .recipe_service
        .list()
        .into_iter()
        .map(RecipeDto::from)
        .collect())
}

/// Get a single recipe by ID
pub fn get_recipe(state: &AppState, recipe_id: &str) -> Result<Option<RecipeDto>, String> {
    let id = parse_id(recipe_id, "recipe")?;
    Ok(state.recipe_service.get(id).map(RecipeDto::from))
}

/// Create a new recipe, returns its id
pub fn create_recipe(state: &AppState, dto: CreateRecipeDto) -> Result<String, String> {
    let id = dto
        .id
        .as_deref()
        .map(|raw| parse_id(raw, "recipe"))
        .transpose()?;
    let image_data = decode_image(dto.image_base64)?;

    let request = CreateRecipeRequest {
        id,
        name: dto.name,
        ingredients: dto.ingredients,
        procedure: dto.procedure,
        image_data,
    };

    state
        .recipe_service
        .add(request)
        .map(|id| id.to_string())
        .to_error_response()
}

/// Replace an existing recipe
pub fn update_recipe(state: &AppState, dto: UpdateRecipeDto) -> Result<(), String> {
    let id = parse_id(&dto.id, "recipe")?;
    let image_data = decode_image(dto.image_base64)?;

    let recipe = Recipe::with_id(id, dto.name, dto.ingredients, dto.procedure).with_image(image_data);

    state.recipe_service.replace(recipe).to_error_response()
}

/// Delete a recipe. Returns false when it did not exist.
pub fn delete_recipe(state: &AppState, recipe_id: &str) -> Result<bool, String> {
    let id = parse_id(recipe_id, "recipe")?;
    state.recipe_service.remove(id).to_error_response()
}
