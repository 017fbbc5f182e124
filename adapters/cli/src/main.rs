#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, solves and plays Maze Chase mazes.

mod autopilot;
mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Generate, Play, Solve};
use tracing_subscriber::EnvFilter;

/// Procedural maze generation with a pursuing adversary.
#[derive(Parser, Debug)]
#[command(name = "maze-chase")]
#[command(about = "Generate, solve and play pursuit mazes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate a solvable maze and save it to a file
    Generate(Generate),

    /// Print the shortest route through a saved maze
    Solve(Solve),

    /// Run a headless session with an autopilot player
    Play(Play),
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(cmd) => cmd.execute(),
        Command::Solve(cmd) => cmd.execute(),
        Command::Play(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so rendered frames on stdout stay clean.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
