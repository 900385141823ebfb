use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::recipe::Recipe;
use crate::domain::{DomainError, DomainResult};

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizState {
    /// Current recipe shown, no judgment yet
    AwaitingGuess,
    /// A guess has been evaluated for the current recipe
    Judged { correct: bool },
    /// Pool exhausted
    Complete,
}

/// How guesses are compared against the current recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgeMode {
    /// The player picks one of the offered recipes
    #[default]
    Identifier,
    /// The player types the recipe name; compared case-insensitively
    Name,
}

/// One of the choices offered to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub recipe_id: Uuid,
    pub name: String,
}

/// A single quiz run over an ordered pool of recipes.
///
/// The session never schedules anything itself. Callers that want the
/// "Correct!" pause decide when to call [`QuizSession::advance`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    mode: JudgeMode,
    pool: Vec<Recipe>,
    cursor: Option<usize>,
    state: QuizState,
    last_guess_correct: Option<bool>,
    attempts: u32,
    mistakes: u32,
}

impl QuizSession {
    /// Starts an identifier-judged session. An empty pool produces a session
    /// that is already `Complete` and never passes through `AwaitingGuess`.
    pub fn start(pool: Vec<Recipe>) -> Self {
        Self::start_with_mode(pool, JudgeMode::Identifier)
    }

    pub fn start_with_mode(pool: Vec<Recipe>, mode: JudgeMode) -> Self {
        let (cursor, state) = if pool.is_empty() {
            (None, QuizState::Complete)
        } else {
            (Some(0), QuizState::AwaitingGuess)
        };

        Self {
            id: Uuid::new_v4(),
            mode,
            pool,
            cursor,
            state,
            last_guess_correct: None,
            attempts: 0,
            mistakes: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> JudgeMode {
        self.mode
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Complete
    }

    /// The recipe whose ingredients are being shown; `None` once complete.
    pub fn current(&self) -> Option<&Recipe> {
        self.cursor.and_then(|idx| self.pool.get(idx))
    }

    /// Outcome of the most recent judgment for the recipe on screen.
    /// Reset to `None` whenever a new recipe is shown.
    pub fn last_guess_correct(&self) -> Option<bool> {
        self.last_guess_correct
    }

    pub fn pool(&self) -> &[Recipe] {
        &self.pool
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of recipes already answered correctly.
    pub fn steps_completed(&self) -> usize {
        match self.cursor {
            Some(idx) => idx,
            None => self.pool.len(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// The choices offered to the player, in pool order.
    pub fn options(&self) -> Vec<QuizOption> {
        self.pool
            .iter()
            .map(|recipe| QuizOption {
                recipe_id: recipe.id,
                name: recipe.name.clone(),
            })
            .collect()
    }

    /// Current recipe's ingredient items in random order. Display only.
    pub fn shuffled_ingredients<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut items = self
            .current()
            .map(Recipe::ingredient_items)
            .unwrap_or_default();
        items.shuffle(rng);
        items
    }

    /// Judges a guess by recipe identifier.
    pub fn submit_guess(&mut self, candidate_id: Uuid) -> DomainResult<bool> {
        self.expect_mode(JudgeMode::Identifier)?;
        let expected = self.expect_awaiting_guess("submit a guess")?;
        let correct = candidate_id == expected.id;
        Ok(self.record_judgment(correct))
    }

    /// Judges a typed recipe name. Trimmed, case-insensitive comparison.
    pub fn submit_name_guess(&mut self, candidate_name: &str) -> DomainResult<bool> {
        self.expect_mode(JudgeMode::Name)?;
        let expected = self.expect_awaiting_guess("submit a guess")?;
        let correct = normalize_name(candidate_name) == normalize_name(&expected.name);
        Ok(self.record_judgment(correct))
    }

    /// Applies the judged outcome: a correct answer moves to the next recipe,
    /// a wrong one returns to `AwaitingGuess` on the same recipe.
    pub fn advance(&mut self) -> DomainResult<QuizState> {
        let correct = match self.state {
            QuizState::Judged { correct } => correct,
            other => {
                return Err(DomainError::InvalidStateTransition(format!(
                    "Cannot advance from {:?}",
                    other
                )))
            }
        };

        if !correct {
            self.state = QuizState::AwaitingGuess;
            return Ok(self.state);
        }

        let next = self.cursor.map(|idx| idx + 1).filter(|idx| *idx < self.pool.len());
        match next {
            Some(idx) => {
                self.cursor = Some(idx);
                self.last_guess_correct = None;
                self.state = QuizState::AwaitingGuess;
            }
            None => {
                self.cursor = None;
                self.state = QuizState::Complete;
            }
        }

        Ok(self.state)
    }

    fn expect_mode(&self, mode: JudgeMode) -> DomainResult<()> {
        if self.mode != mode {
            return Err(DomainError::InvariantViolation(format!(
                "Session judges guesses by {:?}, not {:?}",
                self.mode, mode
            )));
        }
        Ok(())
    }

    fn expect_awaiting_guess(&self, action: &str) -> DomainResult<&Recipe> {
        if self.state != QuizState::AwaitingGuess {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot {} while {:?}",
                action, self.state
            )));
        }
        self.current().ok_or_else(|| {
            DomainError::InvalidStateTransition("No recipe is being shown".to_string())
        })
    }

    fn record_judgment(&mut self, correct: bool) -> bool {
        self.attempts += 1;
        if !correct {
            self.mistakes += 1;
        }
        self.last_guess_correct = Some(correct);
        self.state = QuizState::Judged { correct };
        correct
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn recipe(name: &str, ingredients: &str) -> Recipe {
        Recipe::new(name.to_string(), ingredients.to_string(), String::new())
    }

    fn pool() -> Vec<Recipe> {
        vec![
            recipe("Carbonara", "Pasta, Eggs, Pecorino Cheese, Guanciale, Pepper"),
            recipe("Amatriciana", "Pasta, Tomato, Pecorino Cheese, Guanciale, Pepper"),
            recipe("Cacio e Pepe", "Pasta, Pecorino Cheese, Pepper"),
        ]
    }

    #[test]
    fn test_start_shows_first_recipe() {
        let recipes = pool();
        let session = QuizSession::start(recipes.clone());
        assert_eq!(session.state(), QuizState::AwaitingGuess);
        assert_eq!(session.current().map(|r| r.id), Some(recipes[0].id));
        assert_eq!(session.last_guess_correct(), None);
    }

    #[test]
    fn test_correct_then_wrong_guess_sequence() {
        let recipes = pool();
        let (a, b, c) = (recipes[0].id, recipes[1].id, recipes[2].id);
        let mut session = QuizSession::start(recipes);

        assert!(session.submit_guess(a).unwrap());
        assert_eq!(session.state(), QuizState::Judged { correct: true });
        assert_eq!(session.current().map(|r| r.id), Some(a));

        session.advance().unwrap();
        assert_eq!(session.current().map(|r| r.id), Some(b));

        assert!(!session.submit_guess(c).unwrap());
        assert_eq!(session.last_guess_correct(), Some(false));
        assert_eq!(session.advance().unwrap(), QuizState::AwaitingGuess);
        assert_eq!(session.current().map(|r| r.id), Some(b));
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn test_completion_is_terminal() {
        let recipes = pool();
        let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
        let mut session = QuizSession::start(recipes);

        for id in &ids {
            session.submit_guess(*id).unwrap();
            session.advance().unwrap();
        }

        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.steps_completed(), 3);

        assert!(matches!(
            session.submit_guess(ids[0]),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(matches!(
            session.advance(),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(session.is_complete());
        assert_eq!(session.attempts(), 3);
    }

    #[test]
    fn test_empty_pool_is_complete_immediately() {
        let mut session = QuizSession::start(Vec::new());
        assert_eq!(session.state(), QuizState::Complete);
        assert!(session.current().is_none());
        assert_eq!(session.steps_completed(), 0);
        assert!(session.submit_guess(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_advance_requires_judgment() {
        let mut session = QuizSession::start(pool());
        assert!(session.advance().is_err());
        assert_eq!(session.state(), QuizState::AwaitingGuess);
    }

    #[test]
    fn test_second_guess_before_advance_is_rejected() {
        let recipes = pool();
        let first = recipes[0].id;
        let mut session = QuizSession::start(recipes);
        session.submit_guess(Uuid::new_v4()).unwrap();
        assert!(session.submit_guess(first).is_err());
        assert_eq!(session.state(), QuizState::Judged { correct: false });
    }

    #[test]
    fn test_name_mode_ignores_case_and_padding() {
        let mut session = QuizSession::start_with_mode(pool(), JudgeMode::Name);
        assert!(session.submit_name_guess("  carbonara ").unwrap());
        session.advance().unwrap();
        assert!(!session.submit_name_guess("Carbonara").unwrap());
    }

    #[test]
    fn test_modes_are_not_interchangeable() {
        let recipes = pool();
        let first = recipes[0].id;

        let mut by_id = QuizSession::start(recipes.clone());
        assert!(matches!(
            by_id.submit_name_guess("Carbonara"),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(by_id.state(), QuizState::AwaitingGuess);

        let mut by_name = QuizSession::start_with_mode(recipes, JudgeMode::Name);
        assert!(by_name.submit_guess(first).is_err());
        assert_eq!(by_name.attempts(), 0);
    }

    #[test]
    fn test_shuffle_keeps_items_and_judgment() {
        let recipes = pool();
        let first = recipes[0].id;
        let mut session = QuizSession::start(recipes);
        let mut rng = StdRng::seed_from_u64(7);

        let mut shuffled = session.shuffled_ingredients(&mut rng);
        shuffled.sort();
        assert_eq!(shuffled, vec!["Eggs", "Guanciale", "Pasta", "Pecorino Cheese", "Pepper"]);

        assert!(session.submit_guess(first).unwrap());
    }

    #[test]
    fn test_options_follow_pool_order() {
        let session = QuizSession::start(pool());
        let names: Vec<String> = session.options().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["Carbonara", "Amatriciana", "Cacio e Pepe"]);
    }
}
