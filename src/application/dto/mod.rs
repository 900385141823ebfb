// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are UI-friendly representations (string ids, base64 images)
// - Conversion FROM domain types only; commands build domain values themselves

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::domain::{Achievement, QuizState, Recipe};
use crate::services::{ChallengeSnapshot, GuessOutcome};

// ============================================================================
// RECIPE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDto {
    pub id: String,
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
    pub image_base64: Option<String>,
    /// `jpeg`, `png`, `webp` or `heic`; `None` when the payload is not recognised
    pub image_format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipeDto {
    pub id: Option<String>,
    pub name: String,
    pub ingredients: String,
    #[serde(default)]
    pub procedure: String,
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeDto {
    pub id: String,
    pub name: String,
    pub ingredients: String,
    #[serde(default)]
    pub procedure: String,
    pub image_base64: Option<String>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        let image_format = recipe
            .image()
            .map(|image| format!("{:?}", image.format).to_lowercase());

        Self {
            id: recipe.id.to_string(),
            image_base64: recipe.image_data.as_deref().map(|bytes| STANDARD.encode(bytes)),
            image_format,
            name: recipe.name,
            ingredients: recipe.ingredients,
            procedure: recipe.procedure,
        }
    }
}

// ============================================================================
// ACHIEVEMENT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDto {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image_name: String,
    pub is_unlocked: bool,
}

impl From<Achievement> for AchievementDto {
    fn from(achievement: Achievement) -> Self {
        Self {
            id: achievement.id,
            title: achievement.title,
            description: achievement.description,
            image_name: achievement.image_name,
            is_unlocked: achievement.is_unlocked,
        }
    }
}

// ============================================================================
// CHALLENGE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeOptionDto {
    pub recipe_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeDto {
    pub session_id: String,
    /// `awaiting_guess`, `judged` or `complete`
    pub state: String,
    pub judge_mode: String,
    pub ingredients: Option<String>,
    pub options: Vec<ChallengeOptionDto>,
    pub last_guess_correct: Option<bool>,
    pub steps_completed: usize,
    pub pool_size: usize,
    pub mistakes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessResultDto {
    pub correct: bool,
    /// Message shown under the ingredients
    pub feedback: String,
    pub challenge: ChallengeDto,
}

fn state_label(state: QuizState) -> &'static str {
    match state {
        QuizState::AwaitingGuess => "awaiting_guess",
        QuizState::Judged { .. } => "judged",
        QuizState::Complete => "complete",
    }
}

impl From<ChallengeSnapshot> for ChallengeDto {
    fn from(snapshot: ChallengeSnapshot) -> Self {
        Self {
            session_id: snapshot.session_id.to_string(),
            state: state_label(snapshot.state).to_string(),
            judge_mode: format!("{:?}", snapshot.judge_mode).to_lowercase(),
            ingredients: snapshot.ingredients,
            options: snapshot
                .options
                .into_iter()
                .map(|o| ChallengeOptionDto {
                    recipe_id: o.recipe_id.to_string(),
                    name: o.name,
                })
                .collect(),
            last_guess_correct: snapshot.last_guess_correct,
            steps_completed: snapshot.steps_completed,
            pool_size: snapshot.pool_size,
            mistakes: snapshot.mistakes,
        }
    }
}

impl From<GuessOutcome> for GuessResultDto {
    fn from(outcome: GuessOutcome) -> Self {
        let feedback = if outcome.correct { "Correct!" } else { "Try again!" };
        Self {
            correct: outcome.correct,
            feedback: feedback.to_string(),
            challenge: ChallengeDto::from(outcome.snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JudgeMode, QuizOption};
    use uuid::Uuid;

    #[test]
    fn test_recipe_dto_encodes_image() {
        let recipe = Recipe::new("Toast".to_string(), "Bread".to_string(), String::new())
            .with_image(Some(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
        let dto = RecipeDto::from(recipe);

        assert_eq!(dto.image_base64.as_deref(), Some("iVBORw0KGgo="));
        assert_eq!(dto.image_format.as_deref(), Some("png"));
    }

    #[test]
    fn test_recipe_dto_without_image() {
        let dto = RecipeDto::from(Recipe::new("Toast".to_string(), "Bread".to_string(), String::new()));
        assert!(dto.image_base64.is_none());
        assert!(dto.image_format.is_none());
    }

    #[test]
    fn test_challenge_dto_labels() {
        let recipe_id = Uuid::new_v4();
        let snapshot = ChallengeSnapshot {
            session_id: Uuid::new_v4(),
            state: QuizState::Judged { correct: true },
            judge_mode: JudgeMode::Identifier,
            ingredients: Some("Eggs".to_string()),
            options: vec![QuizOption { recipe_id, name: "Omelette".to_string() }],
            last_guess_correct: Some(true),
            steps_completed: 0,
            pool_size: 1,
            mistakes: 0,
        };

        let dto = GuessResultDto::from(GuessOutcome { correct: true, snapshot });
        assert_eq!(dto.feedback, "Correct!");
        assert_eq!(dto.challenge.state, "judged");
        assert_eq!(dto.challenge.judge_mode, "identifier");
        assert_eq!(dto.challenge.options[0].recipe_id, recipe_id.to_string());
    }
}
