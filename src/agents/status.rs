use std::collections::{HashMap, HashSet};

use crate::env::ShipId;

/// Lifecycle of a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UnitStatus {
    #[default]
    Exploring,
    Returning,
    /// End of the game, everyone heads home. Never left again.
    Shutdown,
}

/// Statuses that survive between turns, owned by the game loop.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    statuses: HashMap<ShipId, UnitStatus>,
}

impl StatusStore {
    pub fn new() -> StatusStore {
        StatusStore::default()
    }

    pub fn get(&self, ship: ShipId) -> Option<UnitStatus> {
        self.statuses.get(&ship).copied()
    }

    pub fn contains(&self, ship: ShipId) -> bool {
        self.statuses.contains_key(&ship)
    }

    pub fn get_or_insert(&mut self, ship: ShipId, default: UnitStatus) -> &mut UnitStatus {
        self.statuses.entry(ship).or_insert(default)
    }

    /// Drops the entries of ships that no longer exist.
    /// Returns the number of removed entries.
    pub fn prune(&mut self, live: &HashSet<ShipId>) -> usize {
        let before = self.statuses.len();
        self.statuses.retain(|id, _| live.contains(id));
        before - self.statuses.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_get_or_insert() {
        let mut store = StatusStore::new();
        assert_eq!(store.get(ShipId(1)), None);
        assert_eq!(*store.get_or_insert(ShipId(1), UnitStatus::Exploring), UnitStatus::Exploring);

        *store.get_or_insert(ShipId(1), UnitStatus::Exploring) = UnitStatus::Returning;
        assert_eq!(
            *store.get_or_insert(ShipId(1), UnitStatus::Exploring),
            UnitStatus::Returning
        );
        assert!(store.contains(ShipId(1)));
        assert!(!store.contains(ShipId(2)));
    }

    #[test]
    fn status_prune() {
        let mut store = StatusStore::new();
        for (id, status) in [
            (1, UnitStatus::Exploring),
            (2, UnitStatus::Returning),
            (3, UnitStatus::Shutdown),
        ] {
            store.get_or_insert(ShipId(id), status);
        }

        let live = [ShipId(2)].into_iter().collect();
        assert_eq!(store.prune(&live), 2);
        assert_eq!(store.get(ShipId(2)), Some(UnitStatus::Returning));
        assert!(!store.contains(ShipId(3)));
        assert!(!store.contains(ShipId(1)));
    }
}
