// src/services/achievement_service.rs
//
// Achievement ledger. One instance per running app, built at startup and
// handed to whoever needs it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, Weak};

use crate::domain::achievement::{
    Achievement, AchievementCatalog, AchievementId, BadgeRule,
};
use crate::error::AppResult;
use crate::events::{
    AchievementUnlocked, ChallengeCompleted, EventBus, PersistenceFailed, RecipeAdded,
};
use crate::repositories::AchievementRepository;

const COLLECTION: &str = "achievements";

pub struct AchievementService {
    achievement_repo: Arc<dyn AchievementRepository>,
    event_bus: Arc<EventBus>,
    achievements: RwLock<Vec<Achievement>>,
}

impl AchievementService {
    /// Loads the stored ledger, or materializes `catalog` all-locked when
    /// nothing usable is stored. Safe to call on every start.
    pub fn initialize(
        achievement_repo: Arc<dyn AchievementRepository>,
        catalog: &AchievementCatalog,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let stored = match achievement_repo.load() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Stored achievements could not be read, using catalog: {}", e);
                None
            }
        };

        match stored {
            Some(achievements) => {
                log::info!("Loaded {} achievements", achievements.len());
                Self {
                    achievement_repo,
                    event_bus,
                    achievements: RwLock::new(achievements),
                }
            }
            None => {
                let achievements = catalog.materialize();
                log::info!("Materialized catalog of {} achievements", achievements.len());
                let service = Self {
                    achievement_repo,
                    event_bus,
                    achievements: RwLock::new(achievements),
                };
                let saved = service.achievement_repo.save(&service.read_achievements());
                service.report_persist(saved);
                service
            }
        }
    }

    /// Unlocks a locked badge. Returns true only on the locked -> unlocked
    /// transition; unknown ids and already unlocked badges are a no-op.
    pub fn unlock(&self, id: AchievementId) -> bool {
        let (title, saved) = {
            let mut achievements = self
                .achievements
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let Some(badge) = achievements.iter_mut().find(|a| a.id == id && !a.is_unlocked) else {
                return false;
            };
            badge.unlock();
            let title = badge.title.clone();
            (title, self.achievement_repo.save(&achievements))
        };

        log::info!("Unlocked achievement {} ({})", id, title);
        self.report_persist(saved);
        self.event_bus.emit(AchievementUnlocked::new(id, title));
        true
    }

    /// Snapshot in catalog order
    pub fn list(&self) -> Vec<Achievement> {
        self.read_achievements().clone()
    }

    pub fn get(&self, id: AchievementId) -> Option<Achievement> {
        self.read_achievements().iter().find(|a| a.id == id).cloned()
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.read_achievements()
            .iter()
            .any(|a| a.id == id && a.is_unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.read_achievements()
            .iter()
            .filter(|a| a.is_unlocked)
            .count()
    }

    /// Wires badge rules to app events. Rules naming a badge the ledger does
    /// not hold are dropped with a warning.
    pub fn register_event_handlers(self: &Arc<Self>, rules: &[BadgeRule]) {
        let rules: Vec<BadgeRule> = rules
            .iter()
            .filter(|rule| {
                let known = self.get(rule.badge_id).is_some();
                if !known {
                    log::warn!("Ignoring rule for unknown badge {}", rule.badge_id);
                }
                known
            })
            .cloned()
            .collect();
        let rules: Arc<[BadgeRule]> = rules.into();

        let ledger: Weak<Self> = Arc::downgrade(self);
        let challenge_rules = Arc::clone(&rules);
        self.event_bus.subscribe::<ChallengeCompleted, _>(move |event| {
            let Some(ledger) = ledger.upgrade() else { return };
            for rule in challenge_rules.iter() {
                if rule.trigger.matches_challenge(event.pool_size, event.mistakes) {
                    ledger.unlock(rule.badge_id);
                }
            }
        });

        let ledger: Weak<Self> = Arc::downgrade(self);
        self.event_bus.subscribe::<RecipeAdded, _>(move |event| {
            let Some(ledger) = ledger.upgrade() else { return };
            for rule in rules.iter() {
                if rule.trigger.matches_collection(event.total_recipes) {
                    ledger.unlock(rule.badge_id);
                }
            }
        });
    }

    fn report_persist(&self, saved: AppResult<()>) {
        if let Err(e) = saved {
            log::warn!("Achievements were not persisted: {}", e);
            self.event_bus
                .emit(PersistenceFailed::new(COLLECTION, e.to_string()));
        }
    }

    fn read_achievements(&self) -> RwLockReadGuard<'_, Vec<Achievement>> {
        self.achievements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
