use std::path::PathBuf;

use clap::Parser;
use log::info;

use caravel::agents::{Agent, StatusStore};
use caravel::game::Snapshot;
use caravel::logging;

#[derive(Parser)]
#[command(name = "caravel turn", about = "Compute the commands for a single turn.")]
struct Opts {
    /// Default configuration.
    #[arg(long, default_value_t)]
    config: Agent,
    /// JSON snapshot of the turn.
    #[arg(value_parser = parse_snapshot, required_unless_present = "file")]
    snapshot: Option<Snapshot>,
    /// File containing the JSON snapshot.
    #[arg(long, conflicts_with = "snapshot")]
    file: Option<PathBuf>,
}

fn parse_snapshot(s: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(s)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging();

    let Opts {
        config,
        snapshot,
        file,
    } = Opts::parse();

    let snapshot = match (snapshot, file) {
        (Some(snapshot), _) => snapshot,
        (None, Some(file)) => serde_json::from_reader(std::fs::File::open(file)?)?,
        (None, None) => return Err("no snapshot given".into()),
    };
    info!("{:?}", snapshot.grid);

    let commands = config.step(&snapshot, &mut StatusStore::new());
    let line = commands
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(())
}
