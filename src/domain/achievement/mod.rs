//! Critical Achievement Invariants:
//!
//! 1. Achievement ids come from a fixed catalog and are unique
//! 2. Display metadata is fixed when the catalog is defined
//! 3. `is_unlocked` starts false and only ever moves to true
//! 4. Entries are never added or removed at runtime

pub mod catalog;
pub mod entity;
pub mod rules;

pub use catalog::{validate_catalog, AchievementCatalog, AchievementDefinition, DEFAULT_CATALOG_SIZE};
pub use entity::{Achievement, AchievementId};
pub use rules::{default_badge_rules, BadgeRule, BadgeTrigger};
