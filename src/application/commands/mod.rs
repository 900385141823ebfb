// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs / string ids, return DTOs
// - Failures come back as a JSON `ErrorResponse` string
// - Commands NEVER contain business logic

pub mod achievement_commands;
pub mod challenge_commands;
pub mod recipe_commands;

pub use achievement_commands::*;
pub use challenge_commands::*;
pub use recipe_commands::*;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} id: {}", what, e)).to_json())
}

pub(crate) fn decode_image(image_base64: Option<String>) -> Result<Option<Vec<u8>>, String> {
    image_base64
        .filter(|encoded| !encoded.is_empty())
        .map(|encoded| STANDARD.decode(encoded.as_bytes()))
        .transpose()
        .map_err(|e| ErrorResponse::validation(format!("Invalid image data: {}", e)).to_json())
}
