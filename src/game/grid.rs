use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::env::{Direction, Position, ShipId};

/// Represents a single tile of the map
#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub halite: usize,
    /// Ship of any player currently on this cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship: Option<ShipId>,
}

impl Cell {
    pub fn new(halite: usize) -> Cell {
        Cell { halite, ship: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.ship.is_some()
    }

    /// Occupied by a ship other than `ship`.
    pub fn is_occupied_by_other(&self, ship: ShipId) -> bool {
        self.ship.map_or(false, |id| id != ship)
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ship {
            Some(id) => write!(f, "{:>4}#{:<3}", self.halite, id.0),
            None => write!(f, "{:>4}    ", self.halite),
        }
    }
}

/// The toroidal halite map.
/// All positions are wrapped around the edges before they are accessed.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Removes all ships from the map.
    pub fn clear_ships(&mut self) {
        for c in &mut self.cells {
            c.ship = None;
        }
    }

    pub fn add_ship(&mut self, id: ShipId, p: Position) {
        self[p].ship = Some(id);
    }

    pub fn normalize(&self, p: Position) -> Position {
        Position::new(
            p.x.rem_euclid(self.width as i16),
            p.y.rem_euclid(self.height as i16),
        )
    }

    /// Directions that bring `from` closer to `to`, x axis first.
    /// These are "unsafe" as no occupancy is considered.
    pub fn unsafe_moves(&self, from: Position, to: Position) -> impl Iterator<Item = Direction> {
        let from = self.normalize(from);
        let to = self.normalize(to);
        let dx = (from.x - to.x).unsigned_abs() as usize;
        let dy = (from.y - to.y).unsigned_abs() as usize;
        let wrapped_dx = self.width - dx;
        let wrapped_dy = self.height - dy;

        let horizontal = if from.x < to.x {
            Some(if dx < wrapped_dx { Direction::East } else { Direction::West })
        } else if from.x > to.x {
            Some(if dx < wrapped_dx { Direction::West } else { Direction::East })
        } else {
            None
        };
        let vertical = if from.y < to.y {
            Some(if dy < wrapped_dy { Direction::South } else { Direction::North })
        } else if from.y > to.y {
            Some(if dy < wrapped_dy { Direction::North } else { Direction::South })
        } else {
            None
        };
        horizontal.into_iter().chain(vertical)
    }

    /// Single greedy step from `from` towards `to`.
    /// Takes the first distance reducing direction whose target is not
    /// `blocked` and stays otherwise.
    pub fn naive_navigate(
        &self,
        from: Position,
        to: Position,
        blocked: impl Fn(Position) -> bool,
    ) -> Direction {
        self.unsafe_moves(from, to)
            .find(|&d| !blocked(self.normalize(from.apply(d))))
            .unwrap_or(Direction::Still)
    }

    fn offset(&self, p: Position) -> usize {
        let p = self.normalize(p);
        p.x as usize + p.y as usize * self.width
    }

    /// Parses a whitespace separated table of halite values, one line per row
    /// starting with `y = 0`.
    pub fn parse(txt: &str) -> Option<Grid> {
        let rows = txt
            .trim()
            .lines()
            .map(|l| {
                l.split_whitespace()
                    .map(|v| v.parse().ok())
                    .collect::<Option<Vec<usize>>>()
            })
            .collect::<Option<Vec<_>>>()?;

        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }

        Some(Grid {
            width,
            height,
            cells: rows.into_iter().flatten().map(Cell::new).collect(),
        })
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, p: Position) -> &Self::Output {
        &self.cells[self.offset(p)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, p: Position) -> &mut Self::Output {
        let i = self.offset(p);
        &mut self.cells[i]
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{")?;
        for y in 0..self.height as i16 {
            write!(f, "  ")?;
            for x in 0..self.width as i16 {
                write!(f, "{:?} ", self[Position::new(x, y)])?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}
