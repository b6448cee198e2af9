use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};

use super::CommandQueue;
use crate::env::{Command, Direction};
use crate::game::Snapshot;

/// Baseline that moves every ship in a random direction it can afford.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomAgent {
    /// Fixed seed for reproducible games, mixed with the turn number
    pub seed: Option<u64>,
}

impl RandomAgent {
    pub fn step(&self, snapshot: &Snapshot) -> Vec<Command> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed ^ snapshot.turn as u64),
            None => SmallRng::from_entropy(),
        };
        let grid = &snapshot.grid;
        let constants = &snapshot.constants;

        let mut queue = CommandQueue::new();
        for ship in &snapshot.ships {
            let move_cost = grid[ship.position].halite / constants.move_cost_ratio.max(1);
            let dir = if ship.halite < move_cost {
                Direction::Still
            } else {
                Direction::iter()
                    .filter(|&d| {
                        d == Direction::Still
                            || !grid[ship.position.apply(d)].is_occupied()
                    })
                    .choose(&mut rng)
                    .unwrap_or(Direction::Still)
            };
            queue.push_move(ship.id, dir);
        }

        if snapshot.progress() < 0.5
            && snapshot.halite >= constants.ship_cost
            && !snapshot.shipyard_occupied()
        {
            queue.push_spawn();
        }
        queue.finish()
    }
}
