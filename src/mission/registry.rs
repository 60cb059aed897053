//! Job-kind to mission resolution

use std::collections::HashMap;
use std::sync::Arc;

use super::{daily, second, Mission};
use crate::models::JobKind;

/// Default first-round order (13:10 batch)
pub const ROUND_ONE: &[&str] = &[
    "evil_treasure",
    "month_card",
    "sign_up",
    "arena",
    "wish",
    "grab_turf",
    "mine_dungeon",
    "zodiac_dungeon",
];

/// Default second-round order (20:01 batch)
pub const ROUND_TWO: &[&str] = &[
    "daily_gift",
    "apprentice_exp",
    "liveness",
    "daily_chest",
    "shop_points",
    "odd_even",
];

/// Resolves mission ids to handlers
///
/// Replaces name-keyed dynamic dispatch with an explicit mapping: a job
/// kind selects an ordered id list, and each id resolves to a handler
/// implementing the [`Mission`] contract.
pub struct MissionRegistry {
    missions: HashMap<&'static str, Arc<dyn Mission>>,
}

impl MissionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            missions: HashMap::new(),
        }
    }

    /// Registry preloaded with every built-in mission
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(daily::EvilTreasure));
        registry.register(Arc::new(daily::MonthCard));
        registry.register(Arc::new(daily::SignUp));
        registry.register(Arc::new(daily::Arena));
        registry.register(Arc::new(daily::Wish));
        registry.register(Arc::new(daily::GrabTurf));
        registry.register(Arc::new(daily::MineDungeon));
        registry.register(Arc::new(daily::ZodiacDungeon));

        registry.register(Arc::new(second::DailyGift));
        registry.register(Arc::new(second::ApprenticeExp));
        registry.register(Arc::new(second::Liveness));
        registry.register(Arc::new(second::DailyChest));
        registry.register(Arc::new(second::ShopPoints));
        registry.register(Arc::new(second::OddEven));

        registry
    }

    /// Register a mission under its id; a later registration with the same
    /// id replaces the earlier one
    pub fn register(&mut self, mission: Arc<dyn Mission>) {
        self.missions.insert(mission.id(), mission);
    }

    /// Resolve a mission id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Mission>> {
        self.missions.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.missions.contains_key(id)
    }

    /// All registered ids, sorted
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.missions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Built-in ordered mission list for a job kind; the check probe has no
    /// missions
    pub fn default_round(kind: JobKind) -> &'static [&'static str] {
        match kind {
            JobKind::One => ROUND_ONE,
            JobKind::Two => ROUND_TWO,
            JobKind::Check => &[],
        }
    }
}

impl Default for MissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_default_rounds() {
        let registry = MissionRegistry::builtin();

        for id in ROUND_ONE.iter().chain(ROUND_TWO) {
            assert!(registry.contains(id), "missing built-in mission {id}");
        }
    }

    #[test]
    fn test_unknown_id_resolves_to_none() {
        let registry = MissionRegistry::builtin();
        assert!(registry.get("no_such_mission").is_none());
    }

    #[test]
    fn test_resolved_mission_keeps_its_id() {
        let registry = MissionRegistry::builtin();
        let mission = registry.get("wish").unwrap();
        assert_eq!(mission.id(), "wish");
        assert_eq!(mission.title(), "许愿");
    }

    #[test]
    fn test_check_round_is_empty() {
        assert!(MissionRegistry::default_round(JobKind::Check).is_empty());
        assert!(!MissionRegistry::default_round(JobKind::One).is_empty());
    }
}
