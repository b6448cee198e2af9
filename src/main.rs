use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{debug, info};

use caravel::agents::{Agent, StatusStore};
use caravel::engine::{Engine, EngineError};
use caravel::env::BOT_NAME;
use caravel::{logging, logging_to};

#[derive(Debug, Parser)]
#[command(name = "caravel", about = "Rule based Halite III bot.")]
struct Opt {
    /// Name sent to the engine.
    #[arg(long, default_value = BOT_NAME)]
    name: String,
    /// Agent configuration in json.
    #[arg(long, default_value_t)]
    config: Agent,
    /// Directory for log files. Logs to stderr if not set.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), EngineError> {
    let Opt {
        name,
        config,
        log_dir,
    } = Opt::parse();

    let stdin = io::stdin();
    let mut engine = Engine::connect(stdin.lock(), io::stdout())?;

    match &log_dir {
        Some(dir) => logging_to(dir, &format!("caravel-{}.log", engine.me))?,
        None => logging(),
    }

    engine.ready(&name)?;
    info!(
        "{} ready as player {} on {}x{} with {}",
        name,
        engine.me,
        engine.width(),
        engine.height(),
        config
    );

    let mut statuses = StatusStore::new();
    while let Some(snapshot) = engine.next_frame()? {
        let timer = Instant::now();
        let commands = config.step(&snapshot, &mut statuses);
        debug!("response time {:?}ms", timer.elapsed().as_millis());
        engine.end_turn(&commands)?;
    }
    info!("game over");
    Ok(())
}
