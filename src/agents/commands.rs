use log::warn;

use crate::env::{Command, Direction, ShipId};

/// Collects the commands of a single turn in the order they are issued.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
    spawned: bool,
}

impl CommandQueue {
    pub fn new() -> CommandQueue {
        CommandQueue::default()
    }

    pub fn push_move(&mut self, ship: ShipId, dir: Direction) {
        self.commands.push(Command::Move(ship, dir));
    }

    pub fn push_stay(&mut self, ship: ShipId) {
        self.push_move(ship, Direction::Still);
    }

    /// Only the first spawn of a turn is kept.
    pub fn push_spawn(&mut self) {
        if self.spawned {
            warn!("ignoring second spawn command");
            return;
        }
        self.spawned = true;
        self.commands.push(Command::Spawn);
    }

    pub fn spawned(&self) -> bool {
        self.spawned
    }

    pub fn finish(self) -> Vec<Command> {
        self.commands
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn command_queue_order() {
        let mut queue = CommandQueue::new();
        queue.push_move(ShipId(2), Direction::East);
        queue.push_stay(ShipId(0));
        queue.push_spawn();
        queue.push_spawn();
        assert!(queue.spawned());
        assert_eq!(
            queue.finish(),
            vec![
                Command::Move(ShipId(2), Direction::East),
                Command::Move(ShipId(0), Direction::Still),
                Command::Spawn,
            ]
        );
    }
}
