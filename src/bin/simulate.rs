use std::time::Instant;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::info;
use owo_colors::OwoColorize;

use caravel::agents::{Agent, StatusStore};
use caravel::env::{Command, Constants, PlayerId};
use caravel::logging;
use caravel::simulate::Simulation;

#[derive(Parser)]
#[command(
    name = "caravel simulator",
    about = "Simulate games with different agents."
)]
struct Opts {
    #[arg(long, default_value_t = 400)]
    turns: usize,
    #[arg(long, default_value_t = 32)]
    width: usize,
    #[arg(long, default_value_t = 32)]
    height: usize,
    #[arg(short, long, default_value_t = 1)]
    game_count: usize,
    /// Seed of the first game, following games increment it.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(short, long)]
    verbose: bool,

    agents: Vec<Agent>,
}

fn main() {
    logging();

    let Opts {
        turns,
        width,
        height,
        game_count,
        seed,
        verbose,
        mut agents,
    } = Opts::parse();

    if agents.is_empty() {
        agents.push(Agent::default());
    }
    if agents.len() > 4 {
        Opts::command()
            .error(ErrorKind::TooManyValues, "only up to 4 players are supported")
            .exit();
    }
    if width < agents.len() || height == 0 {
        Opts::command()
            .error(
                ErrorKind::InvalidValue,
                format!(
                    "a {}x{} map has no room for {} shipyards",
                    width,
                    height,
                    agents.len()
                ),
            )
            .exit();
    }
    if width > i16::MAX as usize || height > i16::MAX as usize {
        Opts::command()
            .error(ErrorKind::InvalidValue, "map size is limited to 32767")
            .exit();
    }

    let start = Instant::now();
    let mut wins = vec![0; agents.len()];

    for i in 0..game_count {
        let constants = Constants {
            max_turns: turns,
            ..Constants::default()
        };
        let scores = play_game(&agents, width, height, constants, seed + i as u64, verbose);
        if let Some(winner) = (0..scores.len()).max_by_key(|&p| scores[p]) {
            wins[winner] += 1;
        }
        println!(
            "{}: {} {:?} {}ms",
            "Finish Game".bright_green(),
            i,
            scores,
            start.elapsed().as_millis()
        );
    }

    println!("Wins: {:?}", wins);
}

fn play_game(
    agents: &[Agent],
    width: usize,
    height: usize,
    constants: Constants,
    seed: u64,
    verbose: bool,
) -> Vec<usize> {
    let mut sim = Simulation::new(width, height, agents.len(), constants, seed);
    let mut statuses = vec![StatusStore::new(); agents.len()];

    if verbose {
        println!("init: {:?}", sim.grid);
    }

    while !sim.finished() {
        let commands: Vec<Vec<Command>> = agents
            .iter()
            .zip(statuses.iter_mut())
            .enumerate()
            .map(|(i, (agent, statuses))| agent.step(&sim.snapshot(PlayerId(i)), statuses))
            .collect();
        if verbose {
            println!("{}: {:?}", sim.turn, commands);
        }
        sim.step(&commands);
    }

    info!("lost ships: {:?}", sim.lost);
    sim.scores()
}
