// src/application/commands/challenge_commands.rs
//
// Challenge Command Handlers
//
// Screen flow: a correct answer shows "Correct!" and moves on after the
// configured pause; a wrong answer shows "Try again!" and stays on the
// same recipe.

use uuid::Uuid;

use crate::application::commands::parse_id;
use crate::application::dto::{ChallengeDto, GuessResultDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::error::AppResult;
use crate::services::GuessOutcome;

/// Start a challenge over the selected recipes, in selection order
pub fn start_challenge(state: &AppState, recipe_ids: &[String]) -> Result<ChallengeDto, String> {
    let ids = recipe_ids
        .iter()
        .map(|raw| parse_id(raw, "recipe"))
        .collect::<Result<Vec<Uuid>, String>>()?;

    Ok(ChallengeDto::from(state.challenge_service.start_challenge(&ids)))
}

/// Current screen state of a challenge
pub fn get_challenge(state: &AppState, session_id: &str) -> Result<ChallengeDto, String> {
    let session_id = parse_id(session_id, "challenge")?;
    state
        .challenge_service
        .snapshot(session_id)
        .map(ChallengeDto::from)
        .to_error_response()
}

/// Guess which recipe the shown ingredients belong to
pub fn submit_guess(
    state: &AppState,
    session_id: &str,
    recipe_id: &str,
) -> Result<GuessResultDto, String> {
    let session_id = parse_id(session_id, "challenge")?;
    let recipe_id = parse_id(recipe_id, "recipe")?;

    let outcome = state.challenge_service.submit_guess(session_id, recipe_id);
    follow_up(state, session_id, outcome).to_error_response()
}

/// Type the recipe name (name-judged challenges only)
pub fn submit_name_guess(
    state: &AppState,
    session_id: &str,
    recipe_name: &str,
) -> Result<GuessResultDto, String> {
    let session_id = parse_id(session_id, "challenge")?;

    let outcome = state
        .challenge_service
        .submit_name_guess(session_id, recipe_name);
    follow_up(state, session_id, outcome).to_error_response()
}

/// Skip the pause and apply the last judgment now
pub fn advance_challenge(state: &AppState, session_id: &str) -> Result<ChallengeDto, String> {
    let session_id = parse_id(session_id, "challenge")?;
    state.cancel_advance(session_id);
    state
        .challenge_service
        .advance(session_id)
        .map(ChallengeDto::from)
        .to_error_response()
}

/// Ingredient items of the recipe on screen, in random order
pub fn shuffle_ingredients(state: &AppState, session_id: &str) -> Result<Vec<String>, String> {
    let session_id = parse_id(session_id, "challenge")?;
    state
        .challenge_service
        .shuffled_ingredients(session_id, &mut rand::thread_rng())
        .to_error_response()
}

/// Leave the challenge screen. A pending advance is dropped.
pub fn end_challenge(state: &AppState, session_id: &str) -> Result<bool, String> {
    let session_id = parse_id(session_id, "challenge")?;
    state.cancel_advance(session_id);
    Ok(state.challenge_service.end_challenge(session_id))
}

fn follow_up(
    state: &AppState,
    session_id: Uuid,
    outcome: AppResult<GuessOutcome>,
) -> AppResult<GuessResultDto> {
    let mut outcome = outcome?;

    if !outcome.correct {
        outcome.snapshot = state.challenge_service.advance(session_id)?;
        return Ok(GuessResultDto::from(outcome));
    }

    match state.challenge_service.schedule_advance(session_id) {
        Ok(advance) => state.track_advance(session_id, advance),
        Err(e) => {
            log::debug!("Advancing immediately: {}", e);
            let snapshot = state.challenge_service.advance(session_id)?;
            let feedback = GuessResultDto::from(outcome);
            return Ok(GuessResultDto {
                challenge: ChallengeDto::from(snapshot),
                ..feedback
            });
        }
    }

    Ok(GuessResultDto::from(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{create_recipe, list_achievements};
    use crate::application::dto::CreateRecipeDto;
    use crate::application::error_handling::{ErrorResponse, ErrorType};
    use crate::config::AppConfig;
    use std::time::Duration;

    fn state_with_recipes() -> (AppState, Vec<String>) {
        let state = AppState::bootstrap(&AppConfig::in_memory()).unwrap();
        let ids = ["Hummus", "Falafel"]
            .iter()
            .map(|name| {
                create_recipe(
                    &state,
                    CreateRecipeDto {
                        name: name.to_string(),
                        ingredients: "Chickpeas, Garlic, Lemon".to_string(),
                        ..Default::default()
                    },
                )
                .unwrap()
            })
            .collect();
        (state, ids)
    }

    fn error_type(message: &str) -> ErrorType {
        serde_json::from_str::<ErrorResponse>(message).unwrap().error_type
    }

    #[test]
    fn test_wrong_guess_returns_to_same_recipe() {
        let (state, ids) = state_with_recipes();
        let challenge = start_challenge(&state, &ids).unwrap();

        let result = submit_guess(&state, &challenge.session_id, &ids[1]).unwrap();
        assert!(!result.correct);
        assert_eq!(result.feedback, "Try again!");
        assert_eq!(result.challenge.state, "awaiting_guess");
        assert_eq!(result.challenge.steps_completed, 0);
        assert_eq!(result.challenge.last_guess_correct, Some(false));
    }

    #[test]
    fn test_correct_guess_without_runtime_advances_immediately() {
        let (state, ids) = state_with_recipes();
        let challenge = start_challenge(&state, &ids).unwrap();

        let first = submit_guess(&state, &challenge.session_id, &ids[0]).unwrap();
        assert_eq!(first.feedback, "Correct!");
        assert_eq!(first.challenge.steps_completed, 1);

        let last = submit_guess(&state, &challenge.session_id, &ids[1]).unwrap();
        assert_eq!(last.challenge.state, "complete");

        let badges = list_achievements(&state).unwrap();
        assert!(badges.iter().any(|b| b.id == 1 && b.is_unlocked));
        assert!(badges.iter().any(|b| b.id == 2 && b.is_unlocked));
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_guess_pauses_before_next_recipe() {
        let (state, ids) = state_with_recipes();
        let challenge = start_challenge(&state, &ids).unwrap();

        let result = submit_guess(&state, &challenge.session_id, &ids[0]).unwrap();
        assert_eq!(result.challenge.state, "judged");

        assert_eq!(state.pending_advance_count(), 1);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        let now = get_challenge(&state, &challenge.session_id).unwrap();
        assert_eq!(now.state, "awaiting_guess");
        assert_eq!(now.steps_completed, 1);
        assert_eq!(state.pending_advance_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_advance_cancels_pending_timer() {
        let (state, ids) = state_with_recipes();
        let session = start_challenge(&state, &ids).unwrap().session_id;

        submit_guess(&state, &session, &ids[0]).unwrap();
        advance_challenge(&state, &session).unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        submit_guess(&state, &session, &ids[1]).unwrap();

        // the first timer would have fired at 1500ms
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(get_challenge(&state, &session).unwrap().state, "judged");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(get_challenge(&state, &session).unwrap().state, "complete");
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_challenge_drops_pending_advance() {
        let (state, ids) = state_with_recipes();
        let session = start_challenge(&state, &ids).unwrap().session_id;

        submit_guess(&state, &session, &ids[0]).unwrap();
        assert!(end_challenge(&state, &session).unwrap());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(
            error_type(&get_challenge(&state, &session).unwrap_err()),
            ErrorType::NotFound
        );
    }

    #[test]
    fn test_guess_after_completion_is_invalid_state() {
        let (state, _) = state_with_recipes();
        let session = start_challenge(&state, &[]).unwrap().session_id;

        let err = advance_challenge(&state, &session).unwrap_err();
        assert_eq!(error_type(&err), ErrorType::InvalidState);
    }

    #[test]
    fn test_shuffle_keeps_items() {
        let (state, ids) = state_with_recipes();
        let session = start_challenge(&state, &ids).unwrap().session_id;

        let mut items = shuffle_ingredients(&state, &session).unwrap();
        items.sort();
        assert_eq!(items, vec!["Chickpeas", "Garlic", "Lemon"]);
    }
}
