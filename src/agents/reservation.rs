use std::collections::HashSet;

use crate::env::Position;

/// Destination cells claimed by our own ships during the current turn.
///
/// Positions have to be normalized by the caller.
#[derive(Debug, Clone, Default)]
pub struct Reservations {
    cells: HashSet<Position>,
}

impl Reservations {
    pub fn new() -> Reservations {
        Reservations::default()
    }

    /// Returns false if the cell was already reserved.
    pub fn reserve(&mut self, p: Position) -> bool {
        self.cells.insert(p)
    }

    pub fn is_reserved(&self, p: Position) -> bool {
        self.cells.contains(&p)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reservations() {
        let mut reservations = Reservations::new();
        assert!(!reservations.is_reserved(Position::new(1, 2)));
        assert!(reservations.reserve(Position::new(1, 2)));
        assert!(reservations.is_reserved(Position::new(1, 2)));
        assert!(!reservations.reserve(Position::new(1, 2)));
        assert!(!reservations.is_reserved(Position::new(2, 1)));
    }
}
