use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::{base64_payload, RecipeImage};

/// A recipe in the user's collection.
///
/// Field names serialize in camelCase so stored blobs keep the layout the
/// mobile app wrote (`imageData` is a base64 string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name, also the answer shown in the quiz options
    pub name: String,

    /// Free text, comma separated in practice
    pub ingredients: String,

    /// Free text, may be empty
    #[serde(default)]
    pub procedure: String,

    /// Encoded image bytes (JPEG in practice)
    #[serde(default, with = "base64_payload", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,
}

impl Recipe {
    /// Create a new Recipe with a fresh identifier
    pub fn new(name: String, ingredients: String, procedure: String) -> Self {
        Self::with_id(Uuid::new_v4(), name, ingredients, procedure)
    }

    pub fn with_id(id: Uuid, name: String, ingredients: String, procedure: String) -> Self {
        Self {
            id,
            name,
            ingredients,
            procedure,
            image_data: None,
        }
    }

    pub fn with_image(mut self, image_data: Option<Vec<u8>>) -> Self {
        self.image_data = image_data;
        self
    }

    /// Ingredient text split into display items.
    pub fn ingredient_items(&self) -> Vec<String> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Decodes the image payload on access. Unknown or empty payloads yield `None`.
    pub fn image(&self) -> Option<RecipeImage<'_>> {
        self.image_data.as_deref().and_then(RecipeImage::decode)
    }

    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
