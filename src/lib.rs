use env_logger::fmt::Formatter;
use owo_colors::{AnsiColors, OwoColorize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

// Exported to be accessable in benchmarks
pub mod agents;
pub mod engine;
pub mod env;
pub mod game;
pub mod simulate;
mod util;

/// Colored logging to stderr. stdout is reserved for the engine.
pub fn logging() {
    let _ = builder().format(logging_format).try_init();
}

/// Plain logging into `file` inside `dir`.
pub fn logging_to(dir: &Path, file: &str) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(true)
        .open(dir.join(file))?;

    let _ = builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:5} {}:{}] {}",
                record.level(),
                record.file().unwrap_or_default(),
                record.line().unwrap_or_default(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}

fn builder() -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.is_test(cfg!(test));
    builder
}

fn logging_format(buf: &mut Formatter, record: &log::Record) -> std::io::Result<()> {
    let color = match record.level() {
        log::Level::Error => AnsiColors::BrightRed,
        log::Level::Warn => AnsiColors::BrightYellow,
        log::Level::Info => AnsiColors::BrightBlack,
        log::Level::Debug => AnsiColors::BrightBlack,
        log::Level::Trace => AnsiColors::BrightBlack,
    };

    writeln!(
        buf,
        "{}",
        format_args!(
            "[{:5} {}:{}] {}",
            record.level(),
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
            record.args()
        )
        .color(color)
    )
}
