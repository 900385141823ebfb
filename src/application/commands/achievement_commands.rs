// src/application/commands/achievement_commands.rs
//
// Achievement Command Handlers

use crate::application::dto::AchievementDto;
use crate::application::state::AppState;

/// All badges, locked and unlocked, in catalog order
pub fn list_achievements(state: &AppState) -> Result<Vec<AchievementDto>, String> {
    Ok(state
        .achievement_service
        .list()
        .into_iter()
        .map(AchievementDto::from)
        .collect())
}

/// Unlock a badge by id. Returns true only when it was locked before.
pub fn unlock_achievement(state: &AppState, achievement_id: u32) -> Result<bool, String> {
    Ok(state.achievement_service.unlock(achievement_id))
}
