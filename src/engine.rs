//! Halite III engine protocol over stdin/stdout like streams.

use std::collections::{HashMap, VecDeque};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

use crate::env::{Command, Constants, PlayerId, Position, ShipId};
use crate::game::{Grid, Ship, Snapshot};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected end of input while reading {0}")]
    Eof(&'static str),
    #[error("invalid {expected} {token:?}")]
    Parse {
        expected: &'static str,
        token: String,
    },
    #[error("invalid game constants: {0}")]
    Constants(#[from] serde_json::Error),
}

/// Whitespace separated tokens, read line by line.
struct Tokens<R> {
    reader: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
        }
    }

    /// Reads a raw line. Returns `None` at the end of the input.
    fn line(&mut self) -> Result<Option<String>, EngineError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end().to_string()))
    }

    /// Makes sure at least one token is buffered.
    /// Returns false at the end of the input.
    fn fill(&mut self) -> Result<bool, EngineError> {
        while self.tokens.is_empty() {
            match self.line()? {
                Some(line) => self
                    .tokens
                    .extend(line.split_whitespace().map(str::to_string)),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, EngineError> {
        if !self.fill()? {
            return Err(EngineError::Eof(expected));
        }
        let token = self.tokens.pop_front().unwrap_or_default();
        token
            .parse()
            .map_err(|_| EngineError::Parse { expected, token })
    }

    fn position(&mut self) -> Result<Position, EngineError> {
        Ok(Position::new(self.next("x")?, self.next("y")?))
    }
}

/// Connection to the game engine.
///
/// Keeps the halite map between frames, the engine only sends changed cells.
pub struct Engine<R, W> {
    input: Tokens<R>,
    output: W,
    pub constants: Constants,
    pub me: PlayerId,
    players: usize,
    shipyards: HashMap<PlayerId, Position>,
    grid: Grid,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Reads the initial game state.
    pub fn connect(reader: R, output: W) -> Result<Self, EngineError> {
        let mut input = Tokens::new(reader);

        let constants = match input.line()? {
            Some(line) => serde_json::from_str(&line)?,
            None => return Err(EngineError::Eof("constants")),
        };

        let players: usize = input.next("number of players")?;
        let me = PlayerId(input.next("player id")?);

        let mut shipyards = HashMap::new();
        for _ in 0..players {
            let player = PlayerId(input.next("player id")?);
            shipyards.insert(player, input.position()?);
        }

        let width: usize = input.next("width")?;
        let height: usize = input.next("height")?;
        if width == 0 || height == 0 {
            return Err(EngineError::Parse {
                expected: "map size",
                token: format!("{}x{}", width, height),
            });
        }
        let mut grid = Grid::new(width, height);
        for cell in &mut grid.cells {
            cell.halite = input.next("halite")?;
        }

        Ok(Self {
            input,
            output,
            constants,
            me,
            players,
            shipyards,
            grid,
        })
    }

    pub fn shipyard(&self, player: PlayerId) -> Option<Position> {
        self.shipyards.get(&player).copied()
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Sends the bot name, afterwards the turn timer starts.
    pub fn ready(&mut self, name: &str) -> Result<(), EngineError> {
        writeln!(self.output, "{}", name)?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads the next frame.
    /// Returns `None` if the engine closed the connection.
    pub fn next_frame(&mut self) -> Result<Option<Snapshot>, EngineError> {
        if !self.input.fill()? {
            return Ok(None);
        }
        let turn: usize = self.input.next("turn number")?;

        self.grid.clear_ships();
        let mut ships = Vec::new();
        let mut halite = 0;
        for _ in 0..self.players {
            let player = PlayerId(self.input.next("player id")?);
            let num_ships: usize = self.input.next("number of ships")?;
            let num_dropoffs: usize = self.input.next("number of dropoffs")?;
            let treasury: usize = self.input.next("player halite")?;

            for _ in 0..num_ships {
                let id = ShipId(self.input.next("ship id")?);
                let position = self.input.position()?;
                let cargo = self.input.next("ship halite")?;
                self.grid.add_ship(id, position);
                if player == self.me {
                    ships.push(Ship::new(id, player, position, cargo));
                }
            }
            for _ in 0..num_dropoffs {
                let _id: usize = self.input.next("dropoff id")?;
                let _position = self.input.position()?;
            }
            if player == self.me {
                halite = treasury;
            }
        }

        let updates: usize = self.input.next("number of updates")?;
        for _ in 0..updates {
            let p = self.input.position()?;
            self.grid[p].halite = self.input.next("halite")?;
        }
        trace!("frame {} with {} cell updates", turn, updates);

        let shipyard = self.shipyard(self.me).unwrap_or_default();
        Ok(Some(Snapshot {
            turn,
            constants: self.constants.clone(),
            me: self.me,
            halite,
            shipyard,
            ships,
            grid: self.grid.clone(),
        }))
    }

    /// Submits the commands of this turn.
    pub fn end_turn(&mut self, commands: &[Command]) -> Result<(), EngineError> {
        let line = commands
            .iter()
            .map(Command::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        debug!("commands: {}", line);
        writeln!(self.output, "{}", line)?;
        self.output.flush()?;
        Ok(())
    }
}
