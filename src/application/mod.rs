// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above services; the UI only ever talks to this layer
// - Translates between DTOs and domain entities
// - Owns the wiring of storage, services and event handlers

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
