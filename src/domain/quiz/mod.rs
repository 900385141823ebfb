//! Memory challenge: one recipe at a time, guess which recipe the shown
//! ingredients belong to.
//!
//! Session Invariants:
//!
//! 1. Only a correct guess moves the pointer forward
//! 2. Judgment is identifier equality unless the name mode is chosen explicitly
//! 3. Once the pool is exhausted the session is terminal
//! 4. Ingredient shuffling never affects judgment

pub mod session;

pub use session::{JudgeMode, QuizOption, QuizSession, QuizState};
