// src/repositories/sqlite/sqlite_recipe_repository.rs

use std::sync::Arc;

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::recipe::Recipe;
use crate::error::AppResult;
use crate::repositories::recipe_repository::RecipeRepository;

const COLLECTION_NAME: &str = "recipes";

/// One row per recipe; `position` keeps insertion order.
pub struct SqliteRecipeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRecipeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_recipe(row: &Row) -> Result<Recipe, rusqlite::Error> {
        let id = Uuid::parse_str(&row.get::<_, String>("id")?)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        Ok(Recipe {
            id,
            name: row.get("name")?,
            ingredients: row.get("ingredients")?,
            procedure: row.get("procedure")?,
            image_data: row.get("image_data")?,
        })
    }
}

impl RecipeRepository for SqliteRecipeRepository {
    fn load(&self) -> AppResult<Option<Vec<Recipe>>> {
        let conn = get_connection(&self.pool)?;

        let written: Option<String> = conn
            .query_row(
                "SELECT written_at FROM collection_meta WHERE name = ?1",
                params![COLLECTION_NAME],
                |row| row.get(0),
            )
            .optional()?;
        if written.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT id, name, ingredients, procedure, image_data
             FROM recipes
             ORDER BY position",
        )?;

        let recipes: Vec<Recipe> = stmt
            .query_map([], Self::row_to_recipe)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(recipes))
    }

    fn save(&self, recipes: &[Recipe]) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM recipes", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO recipes (id, position, name, ingredients, procedure, image_data)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, recipe) in recipes.iter().enumerate() {
                insert.execute(params![
                    recipe.id.to_string(),
                    position as i64,
                    recipe.name,
                    recipe.ingredients,
                    recipe.procedure,
                    recipe.image_data,
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO collection_meta (name, written_at) VALUES (?1, datetime('now'))",
            params![COLLECTION_NAME],
        )?;

        tx.commit()?;
        Ok(())
    }
}
