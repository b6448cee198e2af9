//! Per ship policy: status transitions and the resulting move.

use log::debug;

use super::{CaravelConfig, Reservations, UnitStatus};
use crate::env::{Direction, Position};
use crate::game::{Ship, Snapshot};
use crate::util::argmax;

/// What a ship does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move(Direction),
    /// Explicit stay command
    Stay,
    /// No command at all, the engine keeps the ship in place
    Hold,
}

impl Decision {
    fn step(dir: Direction) -> Decision {
        if dir == Direction::Still {
            Decision::Stay
        } else {
            Decision::Move(dir)
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Decision::Move(d) => Some(*d),
            Decision::Stay => Some(Direction::Still),
            Decision::Hold => None,
        }
    }
}

/// Returns if the game has entered the final shutdown window.
pub fn in_shutdown_window(snapshot: &Snapshot, config: &CaravelConfig) -> bool {
    let max_turns = snapshot.constants.max_turns;
    snapshot.turn + config.shutdown_turns(max_turns) >= max_turns
}

/// Computes the status of a ship for this turn.
///
/// `first_seen` is set for ships that had no status before this turn,
/// they make their first decision as explorers.
pub fn transition(
    status: UnitStatus,
    first_seen: bool,
    ship: &Ship,
    snapshot: &Snapshot,
    config: &CaravelConfig,
) -> UnitStatus {
    if status == UnitStatus::Shutdown || in_shutdown_window(snapshot, config) {
        return UnitStatus::Shutdown;
    }

    let mut status = status;
    let capacity = snapshot.constants.max_halite as f64;
    if !first_seen && ship.halite as f64 >= capacity * config.return_fraction {
        status = UnitStatus::Returning;
    }

    let grid = &snapshot.grid;
    if status == UnitStatus::Returning
        && grid.normalize(ship.position) == grid.normalize(snapshot.shipyard)
    {
        // cargo was deposited
        status = UnitStatus::Exploring;
    }
    status
}

/// Decides the move of a ship and reserves its destination.
pub fn decide(
    status: UnitStatus,
    ship: &Ship,
    snapshot: &Snapshot,
    reservations: &mut Reservations,
    config: &CaravelConfig,
) -> Decision {
    match status {
        UnitStatus::Exploring => explore(ship, snapshot, reservations, config),
        UnitStatus::Returning => go_home(ship, snapshot, reservations, false),
        UnitStatus::Shutdown => go_home(ship, snapshot, reservations, true),
    }
}

/// Greedily moves to the richest of the surrounding cells.
fn explore(
    ship: &Ship,
    snapshot: &Snapshot,
    reservations: &mut Reservations,
    config: &CaravelConfig,
) -> Decision {
    let grid = &snapshot.grid;
    let here = grid.normalize(ship.position);

    let candidates: [(Direction, Position); 5] =
        Direction::ALL.map(|d| (d, grid.normalize(here.apply(d))));
    let mut best = argmax(candidates.iter().map(|&(_, p)| grid[p].halite)).unwrap_or(4);
    if grid[candidates[best].1].halite == 0 {
        // nothing left around here
        best = 4;
    }
    let (dir, target) = candidates[best];

    let worth_moving = ship.halite * config.move_gate_divisor >= grid[here].halite;
    if !reservations.is_reserved(target)
        && !grid[target].is_occupied_by_other(ship.id)
        && worth_moving
    {
        debug!("ship {} explores {:?} ({})", ship.id, dir, grid[target].halite);
        reservations.reserve(target);
        Decision::step(dir)
    } else {
        reservations.reserve(here);
        Decision::Stay
    }
}

/// Single greedy step towards the shipyard.
///
/// Occupied and reserved cells are skipped in favor of the other direction
/// towards the shipyard. On shutdown the shipyard is never considered blocked
/// and ships crash into it even if another ship already claimed it.
fn go_home(
    ship: &Ship,
    snapshot: &Snapshot,
    reservations: &mut Reservations,
    shutdown: bool,
) -> Decision {
    let grid = &snapshot.grid;
    let here = grid.normalize(ship.position);
    let base = grid.normalize(snapshot.shipyard);

    let dir = grid.naive_navigate(here, base, |p| {
        (!shutdown || p != base) && (grid[p].is_occupied() || reservations.is_reserved(p))
    });
    if dir == Direction::Still && here != base {
        debug!("ship {} waits, no free step home", ship.id);
        return Decision::Hold;
    }
    let target = grid.normalize(here.apply(dir));

    if reservations.reserve(target) {
        Decision::step(dir)
    } else if shutdown && target == base {
        debug!("ship {} forces its way into the shipyard", ship.id);
        Decision::step(dir)
    } else {
        debug!("ship {} waits, {:?} is taken", ship.id, target);
        Decision::Hold
    }
}
