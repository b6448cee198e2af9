use std::fmt;
use std::str::FromStr;

mod caravel;
pub use caravel::*;
mod commands;
pub use commands::*;
pub mod fleet;
mod random;
pub use random::*;
mod reservation;
pub use reservation::*;
mod status;
pub use status::*;
pub mod unit;
pub use unit::Decision;

use crate::env::Command;
use crate::game::Snapshot;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Agent {
    Caravel(CaravelConfig),
    Random(RandomAgent),
}

impl Default for Agent {
    fn default() -> Self {
        Self::Caravel(CaravelConfig::default())
    }
}

impl Agent {
    /// Computes the commands for the given turn.
    /// The statuses are kept by the caller from turn to turn.
    pub fn step(&self, snapshot: &Snapshot, statuses: &mut StatusStore) -> Vec<Command> {
        match self {
            Agent::Caravel(config) => config.step(snapshot, statuses),
            Agent::Random(agent) => agent.step(snapshot),
        }
    }
}

impl FromStr for Agent {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn agent_from_str() {
        let agent: Agent = r#"{"Caravel":{"return_fraction":0.9}}"#.parse().unwrap();
        match agent {
            Agent::Caravel(config) => {
                assert_eq!(config.return_fraction, 0.9);
                assert_eq!(config.move_gate_divisor, 10);
            }
            _ => panic!("wrong agent"),
        }

        let agent: Agent = r#"{"Random":{"seed":3}}"#.parse().unwrap();
        assert!(matches!(agent, Agent::Random(RandomAgent { seed: Some(3) })));

        assert!(r#"{"Caravel":{"unknown":1}}"#.parse::<Agent>().is_err());
    }

    #[test]
    fn agent_default_round_trip() {
        let text = Agent::default().to_string();
        assert!(matches!(text.parse::<Agent>(), Ok(Agent::Caravel(_))));
    }
}
