use std::collections::HashSet;

use log::{debug, info};

use super::{fleet, unit, CommandQueue, Decision, Reservations, StatusStore, UnitStatus};
use crate::env::{Command, ShipId};
use crate::game::Snapshot;

/// Tunable thresholds of the greedy harvesting policy.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaravelConfig {
    /// Cargo fraction of the ship capacity at which a ship heads home
    pub return_fraction: f64,
    /// Fraction of the game at its end in which all ships return
    pub shutdown_fraction: f64,
    /// Ships only move if their cargo is at least the current cell's halite
    /// divided by this
    pub move_gate_divisor: usize,
    /// Fraction of the game in which ships are built whenever affordable
    pub early_spawn_fraction: f64,
    /// Start and end of the late spawning window as fractions of the game
    pub late_spawn_window: (f64, f64),
    /// Multiple of the ship cost that has to be saved up in the late window
    pub late_spawn_cost_factor: usize,
}

impl Default for CaravelConfig {
    fn default() -> Self {
        Self {
            return_fraction: 0.75,
            shutdown_fraction: 0.05,
            move_gate_divisor: 10,
            early_spawn_fraction: 0.25,
            late_spawn_window: (0.75, 0.9),
            late_spawn_cost_factor: 3,
        }
    }
}

fn turns(max_turns: usize, fraction: f64) -> usize {
    (max_turns as f64 * fraction).round() as usize
}

impl CaravelConfig {
    /// Length of the shutdown window in turns.
    pub fn shutdown_turns(&self, max_turns: usize) -> usize {
        turns(max_turns, self.shutdown_fraction)
    }

    /// Last turn of the early spawning phase.
    pub fn early_spawn_turns(&self, max_turns: usize) -> usize {
        turns(max_turns, self.early_spawn_fraction)
    }

    /// Exclusive start and inclusive end of the late spawning phase.
    pub fn late_spawn_window(&self, max_turns: usize) -> (usize, usize) {
        let (start, end) = self.late_spawn_window;
        (turns(max_turns, start), turns(max_turns, end))
    }

    /// Plays a single turn.
    ///
    /// Ships are handled in snapshot order. The reservations of the earlier
    /// ships constrain the later ones.
    pub fn step(&self, snapshot: &Snapshot, statuses: &mut StatusStore) -> Vec<Command> {
        let live: HashSet<ShipId> = snapshot.ships.iter().map(|s| s.id).collect();
        let pruned = statuses.prune(&live);
        if pruned > 0 {
            debug!("forgot {} lost ships", pruned);
        }

        let mut reservations = Reservations::new();
        let mut queue = CommandQueue::new();
        let mut counts = [0; 3];

        for ship in &snapshot.ships {
            let first_seen = !statuses.contains(ship.id);
            let status = statuses.get_or_insert(ship.id, UnitStatus::Exploring);
            let next = unit::transition(*status, first_seen, ship, snapshot, self);
            if next != *status {
                debug!("ship {} {:?} -> {:?}", ship.id, status, next);
            }
            *status = next;
            counts[next as usize] += 1;

            match unit::decide(next, ship, snapshot, &mut reservations, self) {
                Decision::Move(dir) => queue.push_move(ship.id, dir),
                Decision::Stay => queue.push_stay(ship.id),
                Decision::Hold => {}
            }
        }

        if fleet::should_spawn(snapshot, &reservations, self) {
            queue.push_spawn();
        }

        info!(
            "turn {}: halite={} ships={} (exploring={} returning={} shutdown={}) spawn={}",
            snapshot.turn,
            snapshot.halite,
            snapshot.ships.len(),
            counts[UnitStatus::Exploring as usize],
            counts[UnitStatus::Returning as usize],
            counts[UnitStatus::Shutdown as usize],
            queue.spawned(),
        );
        queue.finish()
    }
}
