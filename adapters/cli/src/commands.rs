//! Subcommand implementations for the command-line adapter.

use std::{io, path::PathBuf, thread, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Args;
use maze_chase_core::{GameConfig, Maze, Path, SessionStatus};
use maze_chase_persistence::{export_session_log, load_maze, save_maze};
use maze_chase_rendering::{RenderingBackend, Scene, TextRenderer};
use maze_chase_system_generator::Generator;
use maze_chase_system_session::{Input, Session};
use maze_chase_world::{navigation, query, World};
use tracing::{info, warn};

use crate::autopilot;

/// Options shared by every command that generates a maze.
#[derive(Args, Debug)]
pub(crate) struct MazeOptions {
    /// Number of grid columns, walls included
    #[arg(long, default_value_t = 41)]
    columns: u32,

    /// Number of grid rows, walls included
    #[arg(long, default_value_t = 41)]
    rows: u32,

    /// Seed for generation and respawns; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// One extra opening is knocked through per this many cells (0 disables)
    #[arg(long, default_value_t = 5)]
    opening_divisor: u32,
}

impl MazeOptions {
    fn config(&self) -> GameConfig {
        GameConfig::default()
            .with_dimensions(self.columns, self.rows)
            .with_extra_opening_divisor(self.opening_divisor)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Generate a solvable maze and save it to a file.
#[derive(Args, Debug)]
pub(crate) struct Generate {
    #[command(flatten)]
    maze: MazeOptions,

    /// File the maze is written to
    #[arg(short, long, default_value = "maze.txt")]
    output: PathBuf,

    /// Also draw the maze on stdout
    #[arg(long)]
    print: bool,
}

impl Generate {
    pub(crate) fn execute(self) -> Result<()> {
        let config = self.maze.config();
        let seed = self.maze.seed();
        let maze = Generator::new(config, seed)
            .generate()
            .context("maze generation failed")?;

        save_maze(&self.output, &maze)
            .with_context(|| format!("failed to save maze to {}", self.output.display()))?;

        println!(
            "Saved {}x{} maze (seed {seed}) to {}",
            maze.grid().columns(),
            maze.grid().rows(),
            self.output.display()
        );

        if self.print {
            let mut renderer = TextRenderer::new(io::stdout().lock());
            present(&mut renderer, &static_scene(&maze, &Path::empty(), false))?;
        }
        Ok(())
    }
}

/// Print the shortest route through a saved maze.
#[derive(Args, Debug)]
pub(crate) struct Solve {
    /// Maze file to read
    #[arg(short, long, default_value = "maze.txt")]
    maze: PathBuf,

    /// Skip drawing the maze
    #[arg(long)]
    quiet: bool,
}

impl Solve {
    pub(crate) fn execute(self) -> Result<()> {
        let maze = load_maze(&self.maze)
            .with_context(|| format!("failed to load maze from {}", self.maze.display()))?;
        let route = navigation::shortest_path(maze.grid(), maze.entrance(), maze.exit());
        if route.is_empty() {
            bail!(
                "no route from {} to {} in {}",
                maze.entrance(),
                maze.exit(),
                self.maze.display()
            );
        }

        println!("Shortest route: {} steps", route.steps());
        if !self.quiet {
            let mut renderer = TextRenderer::new(io::stdout().lock());
            present(&mut renderer, &static_scene(&maze, &route, true))?;
        }
        Ok(())
    }
}

/// Run a headless session with an autopilot player.
#[derive(Args, Debug)]
pub(crate) struct Play {
    /// Play a saved maze instead of generating one
    #[arg(long)]
    maze: Option<PathBuf>,

    #[command(flatten)]
    options: MazeOptions,

    /// Stop after this many ticks even if the game is still running
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Lives the player starts with
    #[arg(long, default_value_t = 3)]
    lives: u32,

    /// The pursuer replans every this many ticks
    #[arg(long, default_value_t = 2)]
    cadence: u32,

    /// Show the hint trail
    #[arg(long)]
    show_path: bool,

    /// Draw every tick instead of only the final frame
    #[arg(long)]
    frames: bool,

    /// Pace ticks at the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Save the maze that was played
    #[arg(long)]
    save: Option<PathBuf>,

    /// Export the per-tick move log as JSON
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Play {
    pub(crate) fn execute(self) -> Result<()> {
        let config = self
            .options
            .config()
            .with_starting_lives(self.lives)
            .with_pursuer_cadence(self.cadence);
        let seed = self.options.seed();

        let maze = match &self.maze {
            Some(path) => load_maze(path)
                .with_context(|| format!("failed to load maze from {}", path.display()))?,
            None => Generator::new(config, seed)
                .generate()
                .context("maze generation failed")?,
        };
        if let Some(path) = &self.save {
            save_maze(path, &maze)
                .with_context(|| format!("failed to save maze to {}", path.display()))?;
        }

        let mut session = Session::new(maze, &config, seed);
        if self.show_path {
            let _ = session.submit(Input::TogglePath);
        }

        let mut renderer = TextRenderer::new(io::stdout().lock());
        let pace = Duration::from_secs(1) / config.tick_rate_hz();
        let mut ticks_run = 0;

        while ticks_run < self.ticks && !session.status().is_terminal() {
            if let Some(input) = autopilot::next_input(session.world()) {
                let _ = session.submit(input);
            }
            let report = session.tick();
            ticks_run += 1;

            if self.frames {
                present(&mut renderer, &live_scene(session.world()))?;
            }
            if self.realtime && !report.status.is_terminal() {
                thread::sleep(pace);
            }
        }

        if !self.frames {
            present(&mut renderer, &live_scene(session.world()))?;
        }

        match session.status() {
            SessionStatus::Won => println!("You win! ({ticks_run} ticks)"),
            SessionStatus::Lost => println!("Game over! ({ticks_run} ticks)"),
            SessionStatus::Roaming => println!("Stopped after {ticks_run} ticks"),
        }
        info!(
            ticks = ticks_run,
            searches = session.searches_run(),
            status = ?session.status(),
            "session finished"
        );

        if let Some(path) = &self.log {
            let log = session.log();
            if let Err(error) = export_session_log(path, log.player_moves(), log.pursuer_moves()) {
                warn!(%error, path = %path.display(), "failed to export session log");
            }
        }
        Ok(())
    }
}

fn present(renderer: &mut impl RenderingBackend, scene: &Scene<'_>) -> Result<()> {
    renderer.present(scene).context("failed to draw frame")
}

fn live_scene(world: &World) -> Scene<'_> {
    Scene {
        grid: query::grid(world),
        path: query::hint_path(world),
        entrance: query::entrance(world),
        exit: query::exit(world),
        player: query::player(world),
        pursuer: Some(query::pursuer(world)),
        lives: query::lives(world),
        show_path: query::show_path(world),
        status: query::status(world),
    }
}

fn static_scene<'a>(maze: &'a Maze, route: &'a Path, show_path: bool) -> Scene<'a> {
    Scene {
        grid: maze.grid(),
        path: route,
        entrance: maze.entrance(),
        exit: maze.exit(),
        player: maze.entrance(),
        pursuer: None,
        lives: GameConfig::default().starting_lives(),
        show_path,
        status: SessionStatus::Roaming,
    }
}
