// src/main.rs
//
// Headless entry point: loads configuration, wires the application and
// prints the library and badge state as JSON. UI shells embed the library
// and call `application::commands` directly.

use anyhow::Context;
use serde_json::json;

use icook::application::commands::{list_achievements, list_recipes};
use icook::application::AppState;
use icook::config::AppConfig;
use icook::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    init_tracing();

    // 2. CONFIGURATION
    let config = AppConfig::load().context("failed to load configuration")?;

    // 3. SERVICES + EVENT HANDLERS
    let state = AppState::bootstrap(&config).context("failed to start application")?;

    // 4. REPORT
    let recipes = list_recipes(&state).map_err(anyhow::Error::msg)?;
    let achievements = list_achievements(&state).map_err(anyhow::Error::msg)?;

    let report = json!({
        "storage": config.storage.backend,
        "recipes": recipes,
        "achievements": achievements,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
