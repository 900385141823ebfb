//! Critical Recipe Invariants:
//!
//! 1. Recipe id is assigned once and never changes
//! 2. Recipe id is unique within the stored collection
//! 3. Recipe name cannot be empty
//! 4. Ingredients and procedure are opaque text (procedure may be empty)
//! 5. The image payload is optional and never inspected by quiz or badge logic

pub mod entity;
pub mod image;
pub mod invariants;

pub use entity::Recipe;
pub use image::{ImageFormat, RecipeImage};
pub use invariants::validate_recipe;
