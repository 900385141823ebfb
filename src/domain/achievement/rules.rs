use serde::{Deserialize, Serialize};

use super::entity::AchievementId;

/// Unlocks `badge_id` when `trigger` matches an app event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRule {
    pub badge_id: AchievementId,
    pub trigger: BadgeTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeTrigger {
    /// A memory challenge finished with at least this many recipes
    ChallengeCompleted { min_pool_size: usize },
    /// A memory challenge finished without a single wrong guess
    FlawlessChallenge { min_pool_size: usize },
    /// The recipe collection reached this size
    RecipeCollection { at_least: usize },
}

impl BadgeTrigger {
    pub fn matches_challenge(&self, pool_size: usize, mistakes: u32) -> bool {
        match *self {
            BadgeTrigger::ChallengeCompleted { min_pool_size } => pool_size >= min_pool_size.max(1),
            BadgeTrigger::FlawlessChallenge { min_pool_size } => {
                mistakes == 0 && pool_size >= min_pool_size.max(1)
            }
            BadgeTrigger::RecipeCollection { .. } => false,
        }
    }

    pub fn matches_collection(&self, total_recipes: usize) -> bool {
        match *self {
            BadgeTrigger::RecipeCollection { at_least } => total_recipes >= at_least,
            _ => false,
        }
    }
}

/// Rules shipped with the app
pub fn default_badge_rules() -> Vec<BadgeRule> {
    vec![
        BadgeRule {
            badge_id: 1,
            trigger: BadgeTrigger::ChallengeCompleted { min_pool_size: 1 },
        },
        BadgeRule {
            badge_id: 2,
            trigger: BadgeTrigger::FlawlessChallenge { min_pool_size: 1 },
        },
        BadgeRule {
            badge_id: 3,
            trigger: BadgeTrigger::RecipeCollection { at_least: 1 },
        },
        BadgeRule {
            badge_id: 4,
            trigger: BadgeTrigger::RecipeCollection { at_least: 10 },
        },
    ]
}
