use serde::{Deserialize, Serialize};

pub type AchievementId = u32;

/// A badge and its unlock state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub image_name: String,
    pub is_unlocked: bool,
}

impl Achievement {
    /// Create a locked Achievement
    pub fn locked(
        id: AchievementId,
        title: String,
        description: String,
        image_name: String,
    ) -> Self {
        Self {
            id,
            title,
            description,
            image_name,
            is_unlocked: false,
        }
    }

    /// One-way transition. Returns true only when the badge was locked.
    pub fn unlock(&mut self) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_unlocked = true;
        true
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_one_way() {
        let mut badge = Achievement::locked(1, "Badge 1".into(), "Complete goal 1".into(), "Badge1".into());
        assert!(badge.unlock());
        assert!(badge.is_unlocked);
        assert!(!badge.unlock());
        assert!(badge.is_unlocked);
    }

    #[test]
    fn test_reads_stored_layout() {
        let json = r#"{"id":3,"title":"Badge 3","description":"Complete goal 3","imageName":"Badge3","isUnlocked":true}"#;
        let badge: Achievement = serde_json::from_str(json).unwrap();
        assert_eq!(badge.id, 3);
        assert_eq!(badge.image_name, "Badge3");
        assert!(badge.is_unlocked);
    }
}
