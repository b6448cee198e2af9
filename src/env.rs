use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

pub const BOT_NAME: &str = "Caravel";

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Position {
        Position { x, y }
    }

    pub fn apply(self, d: Direction) -> Position {
        self + d.into()
    }
}

impl From<Direction> for Position {
    fn from(d: Direction) -> Self {
        match d {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Still => Position::new(0, 0),
        }
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Halite III directions. The y axis points south.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Still,
}

impl Direction {
    /// Cardinals followed by `Still`, the order in which candidates are evaluated.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Still,
    ];

    pub fn iter() -> impl Iterator<Item = Direction> {
        Self::ALL.iter().copied()
    }

    pub fn encode(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
            Direction::Still => 'o',
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game constants sent by the engine as the first line of the init message.
/// Keys the bot does not care about are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Constants {
    #[serde(rename = "MAX_HALITE")]
    pub max_halite: usize,
    #[serde(rename = "NEW_ENTITY_ENERGY_COST")]
    pub ship_cost: usize,
    #[serde(rename = "MAX_TURNS")]
    pub max_turns: usize,
    #[serde(rename = "MOVE_COST_RATIO")]
    pub move_cost_ratio: usize,
    #[serde(rename = "EXTRACT_RATIO")]
    pub extract_ratio: usize,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            max_halite: 1000,
            ship_cost: 1000,
            max_turns: 400,
            move_cost_ratio: 10,
            extract_ratio: 4,
        }
    }
}

/// A single command submitted to the engine.
/// A move with [`Direction::Still`] is the explicit stay command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(ShipId, Direction),
    Spawn,
}

impl Command {
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            Command::Move(id, _) => Some(*id),
            Command::Spawn => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(id, d) => write!(f, "m {} {}", id, d.encode()),
            Command::Spawn => write!(f, "g"),
        }
    }
}
