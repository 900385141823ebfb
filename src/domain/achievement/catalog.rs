use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::{Achievement, AchievementId};
use crate::domain::{DomainError, DomainResult};

/// Size of the catalog shipped with the app
pub const DEFAULT_CATALOG_SIZE: u32 = 12;

/// Static badge metadata, as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub image_name: String,
}

/// The fixed, ordered set of badge definitions the ledger starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementCatalog {
    entries: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    /// Generated catalog: ids 1..=size with placeholder titles and images.
    pub fn generate(size: u32) -> Self {
        let entries = (1..=size)
            .map(|n| AchievementDefinition {
                id: n,
                title: format!("Badge {}", n),
                description: format!("Complete goal {}", n),
                image_name: format!("Badge{}", n),
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<AchievementDefinition>) -> DomainResult<Self> {
        let catalog = Self { entries };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[AchievementDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Every entry as a locked Achievement, in catalog order.
    pub fn materialize(&self) -> Vec<Achievement> {
        self.entries
            .iter()
            .map(|entry| {
                Achievement::locked(
                    entry.id,
                    entry.title.clone(),
                    entry.description.clone(),
                    entry.image_name.clone(),
                )
            })
            .collect()
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::generate(DEFAULT_CATALOG_SIZE)
    }
}

/// Catalog invariants:
/// 1. Ids are unique
/// 2. Titles are not empty
pub fn validate_catalog(catalog: &AchievementCatalog) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for entry in catalog.entries() {
        if !seen.insert(entry.id) {
            return Err(DomainError::InvariantViolation(format!(
                "Duplicate achievement id {} in catalog",
                entry.id
            )));
        }
        if entry.title.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "Achievement {} has an empty title",
                entry.id
            )));
        }
    }
    Ok(())
}
