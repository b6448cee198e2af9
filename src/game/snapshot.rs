use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Grid;
use crate::env::{Constants, PlayerId, Position, ShipId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    pub id: ShipId,
    pub owner: PlayerId,
    pub position: Position,
    pub halite: usize,
}

impl Ship {
    pub fn new(id: ShipId, owner: PlayerId, position: Position, halite: usize) -> Ship {
        Ship {
            id,
            owner,
            position,
            halite,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("grid of {width}x{height} is empty")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid of {width}x{height} has {cells} cells")]
    CellCount {
        width: usize,
        height: usize,
        cells: usize,
    },
}

/// Read only view of the world for a single player and turn.
///
/// The grid contains the halite of every cell and the ships of all players,
/// `ships` only those of `me`.
/// Deserialized snapshots are validated and get their ships placed on the grid.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(try_from = "SnapshotData")]
pub struct Snapshot {
    pub turn: usize,
    pub constants: Constants,
    pub me: PlayerId,
    /// Treasury of the player
    pub halite: usize,
    pub shipyard: Position,
    pub ships: Vec<Ship>,
    pub grid: Grid,
}

#[derive(Deserialize)]
struct SnapshotData {
    turn: usize,
    #[serde(default)]
    constants: Constants,
    me: PlayerId,
    halite: usize,
    shipyard: Position,
    ships: Vec<Ship>,
    grid: Grid,
}

impl TryFrom<SnapshotData> for Snapshot {
    type Error = SnapshotError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        let (width, height) = (data.grid.width, data.grid.height);
        if width == 0 || height == 0 {
            return Err(SnapshotError::EmptyGrid { width, height });
        }
        if data.grid.cells.len() != width * height {
            return Err(SnapshotError::CellCount {
                width,
                height,
                cells: data.grid.cells.len(),
            });
        }
        Ok(Snapshot::new(
            data.turn,
            data.constants,
            data.me,
            data.halite,
            data.shipyard,
            data.ships,
            data.grid,
        ))
    }
}

impl Snapshot {
    /// Creates a snapshot and places the given ships on the grid.
    pub fn new(
        turn: usize,
        constants: Constants,
        me: PlayerId,
        halite: usize,
        shipyard: Position,
        ships: Vec<Ship>,
        mut grid: Grid,
    ) -> Snapshot {
        for ship in &ships {
            grid.add_ship(ship.id, ship.position);
        }
        Snapshot {
            turn,
            constants,
            me,
            halite,
            shipyard,
            ships,
            grid,
        }
    }

    /// Halite amount and occupancy of a cell.
    pub fn cell_info(&self, p: Position) -> (usize, bool) {
        let cell = &self.grid[p];
        (cell.halite, cell.is_occupied())
    }

    pub fn shipyard_occupied(&self) -> bool {
        self.grid[self.shipyard].is_occupied()
    }

    /// Fraction of the game that has been played.
    pub fn progress(&self) -> f64 {
        self.turn as f64 / self.constants.max_turns.max(1) as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::agents::{CaravelConfig, StatusStore};
    use crate::env::{Command, Direction};

    fn snapshot() -> Snapshot {
        let grid = Grid::parse(
            r#"
            0 10 0
            5  3 0
            0  0 7"#,
        )
        .unwrap();
        Snapshot::new(
            1,
            Constants::default(),
            PlayerId(0),
            5000,
            Position::new(0, 0),
            vec![Ship::new(ShipId(4), PlayerId(0), Position::new(1, 1), 0)],
            grid,
        )
    }

    #[test]
    fn snapshot_cell_info() {
        let snapshot = snapshot();
        assert_eq!(snapshot.cell_info(Position::new(1, 1)), (3, true));
        assert_eq!(snapshot.cell_info(Position::new(1, 0)), (10, false));
        assert_eq!(snapshot.cell_info(Position::new(4, 3)), (10, false));
        assert!(!snapshot.shipyard_occupied());
    }

    #[test]
    fn snapshot_reads_are_idempotent() {
        let snapshot = snapshot();
        for x in -1..4 {
            for y in -1..4 {
                let p = Position::new(x, y);
                assert_eq!(snapshot.cell_info(p), snapshot.cell_info(p));
            }
        }
    }

    #[test]
    fn snapshot_json() {
        let snapshot = snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.grid, snapshot.grid);
        assert_eq!(parsed.ships, snapshot.ships);
        assert_eq!(parsed.shipyard, snapshot.shipyard);
    }

    const FLEET_JSON: &str = r#"{
        "turn": 1,
        "me": 0,
        "halite": 5000,
        "shipyard": {"x": 0, "y": 0},
        "ships": [
            {"id": 1, "owner": 0, "position": {"x": 0, "y": 0}, "halite": 0},
            {"id": 2, "owner": 0, "position": {"x": 1, "y": 0}, "halite": 0}
        ],
        "grid": {"width": 3, "height": 3, "cells": [
            {"halite": 0}, {"halite": 50}, {"halite": 0},
            {"halite": 0}, {"halite": 0}, {"halite": 0},
            {"halite": 0}, {"halite": 0}, {"halite": 0}
        ]}
    }"#;

    #[test]
    fn snapshot_json_places_ships() {
        let snapshot: Snapshot = serde_json::from_str(FLEET_JSON).unwrap();
        assert!(snapshot.shipyard_occupied());
        assert_eq!(snapshot.cell_info(Position::new(1, 0)), (50, true));
        assert_eq!(snapshot.constants, Constants::default());

        // Neither a collision with ship 2 nor a spawn onto ship 1
        let commands = CaravelConfig::default().step(&snapshot, &mut StatusStore::new());
        assert_eq!(
            commands,
            vec![
                Command::Move(ShipId(1), Direction::Still),
                Command::Move(ShipId(2), Direction::Still),
            ]
        );
    }

    #[test]
    fn snapshot_json_rejects_broken_grid() {
        let empty = FLEET_JSON.replace(r#""width": 3"#, r#""width": 0"#);
        let err = serde_json::from_str::<Snapshot>(&empty).unwrap_err();
        assert!(err.to_string().contains("is empty"), "{}", err);

        let short = FLEET_JSON.replace(r#""height": 3"#, r#""height": 4"#);
        let err = serde_json::from_str::<Snapshot>(&short).unwrap_err();
        assert!(err.to_string().contains("has 9 cells"), "{}", err);
    }
}
