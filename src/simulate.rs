//! Simplified local Halite III engine for offline games.

use std::collections::HashMap;

use log::{debug, trace};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::env::{Command, Constants, Direction, PlayerId, Position, ShipId};
use crate::game::{Grid, Ship, Snapshot};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub shipyard: Position,
    pub halite: usize,
}

/// Game state of a locally simulated match.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub constants: Constants,
    /// Turn that is played next, starting at 1
    pub turn: usize,
    pub players: Vec<Player>,
    pub ships: Vec<Ship>,
    pub grid: Grid,
    next_ship: usize,
    /// Ships destroyed per player
    pub lost: Vec<usize>,
}

impl Simulation {
    /// Creates a game with a random halite field that is mirrored for every
    /// player and shipyards spread along the middle row.
    pub fn new(width: usize, height: usize, players: usize, constants: Constants, seed: u64) -> Simulation {
        assert!(players > 0 && width >= players && height > 0);
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut grid = Grid::new(width, height);
        let segment = width / players;
        let rich = constants.max_halite / 5;
        for y in 0..height {
            let row: Vec<usize> = (0..segment)
                .map(|_| {
                    // mostly sparse with a few rich spots
                    if rng.gen::<f64>() < 0.2 {
                        rng.gen_range(rich..=constants.max_halite)
                    } else {
                        rng.gen_range(0..rich.max(1))
                    }
                })
                .collect();
            for x in 0..width {
                let i = x % segment;
                let halite = if (x / segment) % 2 == 0 {
                    row[i]
                } else {
                    row[segment - 1 - i]
                };
                grid[Position::new(x as i16, y as i16)].halite = halite;
            }
        }

        let players = (0..players)
            .map(|i| Player {
                id: PlayerId(i),
                shipyard: Position::new((segment * i + segment / 2) as i16, (height / 2) as i16),
                halite: constants.ship_cost * 5,
            })
            .collect::<Vec<_>>();
        // structures hold no halite
        for player in &players {
            grid[player.shipyard].halite = 0;
        }

        Simulation {
            constants,
            turn: 1,
            lost: vec![0; players.len()],
            players,
            ships: Vec::new(),
            grid,
            next_ship: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.turn > self.constants.max_turns
    }

    /// The world as seen by `player` at the current turn.
    pub fn snapshot(&self, player: PlayerId) -> Snapshot {
        let mut grid = self.grid.clone();
        grid.clear_ships();
        for ship in &self.ships {
            grid.add_ship(ship.id, ship.position);
        }
        let me = &self.players[player.0];
        Snapshot {
            turn: self.turn,
            constants: self.constants.clone(),
            me: player,
            halite: me.halite,
            shipyard: me.shipyard,
            ships: self
                .ships
                .iter()
                .filter(|s| s.owner == player)
                .copied()
                .collect(),
            grid,
        }
    }

    /// Final treasuries of all players.
    pub fn scores(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.halite).collect()
    }

    /// Executes one turn. `commands` holds the commands of every player.
    /// Commands for foreign or unknown ships are ignored.
    pub fn step(&mut self, commands: &[Vec<Command>]) {
        assert_eq!(commands.len(), self.players.len());
        let constants = self.constants.clone();

        // Moves
        let mut moves: HashMap<ShipId, Direction> = HashMap::new();
        let mut spawns = Vec::new();
        for (player, commands) in self.players.iter().zip(commands) {
            for command in commands {
                match *command {
                    Command::Move(id, dir) => {
                        if self.ships.iter().any(|s| s.id == id && s.owner == player.id) {
                            moves.entry(id).or_insert(dir);
                        }
                    }
                    Command::Spawn => {
                        if !spawns.contains(&player.id) {
                            spawns.push(player.id);
                        }
                    }
                }
            }
        }

        let grid = &mut self.grid;
        let mut stayed = Vec::new();
        for ship in &mut self.ships {
            let dir = moves.get(&ship.id).copied().unwrap_or(Direction::Still);
            let cost = grid[ship.position].halite / constants.move_cost_ratio.max(1);
            if dir != Direction::Still && ship.halite >= cost {
                ship.halite -= cost;
                ship.position = grid.normalize(ship.position.apply(dir));
            } else {
                stayed.push(ship.id);
            }
        }

        // Mining
        for ship in self.ships.iter_mut().filter(|s| stayed.contains(&s.id)) {
            let cell = &mut grid[ship.position];
            let ratio = constants.extract_ratio.max(1);
            let extracted = ((cell.halite + ratio - 1) / ratio)
                .min(constants.max_halite.saturating_sub(ship.halite));
            cell.halite -= extracted;
            ship.halite += extracted;
        }

        // Spawning
        for id in spawns {
            let player = &mut self.players[id.0];
            if player.halite >= constants.ship_cost {
                player.halite -= constants.ship_cost;
                let ship = Ship::new(ShipId(self.next_ship), id, player.shipyard, 0);
                trace!("player {} spawns ship {}", id, ship.id);
                self.next_ship += 1;
                self.ships.push(ship);
            }
        }

        // Collisions
        let mut cells: HashMap<Position, usize> = HashMap::new();
        for ship in &self.ships {
            *cells.entry(ship.position).or_default() += 1;
        }
        let (crashed, survivors): (Vec<Ship>, Vec<Ship>) = std::mem::take(&mut self.ships)
            .into_iter()
            .partition(|s| cells[&s.position] > 1);
        for ship in crashed {
            debug!("turn {}: ship {} crashed at {:?}", self.turn, ship.id, ship.position);
            self.lost[ship.owner.0] += 1;
            match self.players.iter_mut().find(|p| p.shipyard == ship.position) {
                Some(owner) => owner.halite += ship.halite,
                None => self.grid[ship.position].halite += ship.halite,
            }
        }
        self.ships = survivors;

        // Deposits
        for ship in &mut self.ships {
            let player = &mut self.players[ship.owner.0];
            if ship.position == player.shipyard {
                player.halite += ship.halite;
                ship.halite = 0;
            }
        }

        self.turn += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agents::{Agent, CaravelConfig, RandomAgent, StatusStore};

    fn constants(max_turns: usize) -> Constants {
        Constants {
            max_turns,
            ..Constants::default()
        }
    }

    #[test]
    fn simulation_rules() {
        let mut sim = Simulation::new(8, 8, 1, constants(50), 0);
        let shipyard = sim.players[0].shipyard;
        assert_eq!(shipyard, Position::new(4, 4));
        assert_eq!(sim.players[0].halite, 5000);
        assert_eq!(sim.grid[shipyard].halite, 0);

        sim.step(&[vec![Command::Spawn, Command::Spawn]]);
        assert_eq!(sim.ships.len(), 1);
        assert_eq!(sim.players[0].halite, 4000);
        let id = sim.ships[0].id;

        // Move away and mine
        let east = shipyard.apply(Direction::East);
        sim.grid[east].halite = 400;
        sim.step(&[vec![Command::Move(id, Direction::East)]]);
        assert_eq!(sim.ships[0].position, east);
        sim.step(&[vec![Command::Move(id, Direction::Still)]]);
        assert_eq!(sim.ships[0].halite, 100);
        assert_eq!(sim.grid[east].halite, 300);

        // Back home, deposit
        sim.step(&[vec![Command::Move(id, Direction::West)]]);
        assert_eq!(sim.ships[0].halite, 0);
        assert_eq!(sim.players[0].halite, 4070);
        assert_eq!(sim.turn, 5);
    }

    #[test]
    fn simulation_collisions() {
        let mut sim = Simulation::new(8, 8, 1, constants(50), 0);
        let shipyard = sim.players[0].shipyard;
        sim.grid[shipyard.apply(Direction::North)].halite = 0;
        sim.step(&[vec![Command::Spawn]]);
        let first = sim.ships[0].id;
        sim.step(&[vec![Command::Move(first, Direction::North)]]);

        // Second ship spawns, first returns onto the shipyard
        sim.ships[0].halite = 500;
        sim.step(&[vec![Command::Move(first, Direction::South), Command::Spawn]]);
        assert!(sim.ships.is_empty());
        assert_eq!(sim.lost[0], 2);
        // cargo of the crashed ship goes to the shipyard owner
        assert_eq!(sim.players[0].halite, 5000 - 2000 + 500);
        assert_eq!(sim.grid[shipyard].halite, 0);
    }

    #[test]
    fn simulation_small_capacity() {
        for max_halite in [0, 1, 150] {
            let constants = Constants {
                max_halite,
                ..constants(50)
            };
            let sim = Simulation::new(5, 5, 2, constants, 3);
            assert!(sim.grid.cells.iter().all(|c| c.halite <= max_halite));
        }
    }

    #[test]
    fn simulation_snapshot() {
        let mut sim = Simulation::new(16, 8, 2, constants(50), 3);
        sim.step(&[vec![Command::Spawn], vec![Command::Spawn]]);
        let snapshot = sim.snapshot(PlayerId(1));
        assert_eq!(snapshot.turn, 2);
        assert_eq!(snapshot.ships.len(), 1);
        assert_eq!(snapshot.ships[0].owner, PlayerId(1));
        assert!(snapshot.shipyard_occupied());
        assert!(snapshot.grid[sim.players[0].shipyard].is_occupied());
    }

    #[test]
    fn caravel_keeps_its_fleet_until_shutdown() {
        let config = CaravelConfig::default();
        let agent = Agent::Caravel(config.clone());
        let mut statuses = StatusStore::new();
        let max_turns = 200;
        let mut sim = Simulation::new(24, 24, 1, constants(max_turns), 7);
        let shutdown = max_turns - config.shutdown_turns(max_turns);

        while !sim.finished() {
            let snapshot = sim.snapshot(PlayerId(0));
            let commands = agent.step(&snapshot, &mut statuses);
            for ship in &snapshot.ships {
                assert!(commands.iter().filter(|c| c.ship() == Some(ship.id)).count() <= 1);
            }
            assert!(commands.iter().filter(|c| **c == Command::Spawn).count() <= 1);

            sim.step(&[commands]);
            if sim.turn <= shutdown {
                assert_eq!(sim.lost[0], 0, "ship lost in turn {}", sim.turn - 1);
            }
        }
        assert!(sim.players[0].halite > 0);
    }

    #[test]
    fn caravel_against_random() {
        let agents = [
            Agent::Caravel(CaravelConfig::default()),
            Agent::Random(RandomAgent { seed: Some(1) }),
        ];
        let mut statuses = [StatusStore::new(), StatusStore::new()];
        let mut sim = Simulation::new(32, 16, 2, constants(100), 11);

        while !sim.finished() {
            let commands: Vec<Vec<Command>> = agents
                .iter()
                .zip(statuses.iter_mut())
                .enumerate()
                .map(|(i, (agent, statuses))| agent.step(&sim.snapshot(PlayerId(i)), statuses))
                .collect();
            sim.step(&commands);
        }
        assert_eq!(sim.turn, 101);
        assert_eq!(sim.scores().len(), 2);
    }
}
