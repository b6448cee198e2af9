use log::debug;

use super::{CaravelConfig, Reservations};
use crate::game::Snapshot;

/// Decides whether the shipyard spawns a new ship this turn.
///
/// Early in the game a ship is built whenever it is affordable. Later only if
/// the treasury covers a multiple of the ship cost within the late window.
/// The shipyard has to be free and no ship of ours may be headed there.
pub fn should_spawn(snapshot: &Snapshot, reservations: &Reservations, config: &CaravelConfig) -> bool {
    let constants = &snapshot.constants;
    let turn = snapshot.turn;
    let max_turns = constants.max_turns;

    let early = turn <= config.early_spawn_turns(max_turns) && snapshot.halite >= constants.ship_cost;
    let (late_start, late_end) = config.late_spawn_window(max_turns);
    let late = late_start < turn
        && turn <= late_end
        && snapshot.halite >= constants.ship_cost * config.late_spawn_cost_factor;

    if !(early || late) {
        return false;
    }

    let shipyard = snapshot.grid.normalize(snapshot.shipyard);
    if snapshot.shipyard_occupied() || reservations.is_reserved(shipyard) {
        debug!("shipyard blocked, not spawning");
        return false;
    }
    true
}
