#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick orchestration for a single Maze Chase session.
//!
//! A tick runs in a fixed order: the world opens the tick (declaring a win if
//! the player stands on the exit), the pursuit system reacts to the opened
//! tick, its step is applied, and finally the world settles the tick by
//! logging both positions and resolving collisions.

use maze_chase_core::{
    Command, Direction, Event, GameConfig, Maze, SessionLog, SessionStatus,
};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World};
use tracing::trace;

/// Discrete input delivered by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Move the player one cell.
    Move(Direction),
    /// Show or hide the hint trail.
    TogglePath,
}

/// Outcome of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Events emitted while the tick ran, in order.
    pub events: Vec<Event>,
    /// Session status once the tick completed.
    pub status: SessionStatus,
}

/// Owns the world and the pursuit system for one game.
#[derive(Debug)]
pub struct Session {
    world: World,
    pursuit: Pursuit,
}

impl Session {
    /// Starts a session on `maze`.
    #[must_use]
    pub fn new(maze: Maze, config: &GameConfig, seed: u64) -> Self {
        Self {
            world: World::new(maze, config, seed),
            pursuit: Pursuit::from_config(config),
        }
    }

    /// Applies an input event immediately.
    pub fn submit(&mut self, input: Input) -> Vec<Event> {
        let command = match input {
            Input::Move(direction) => Command::MovePlayer { direction },
            Input::TogglePath => Command::TogglePathDisplay,
        };

        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    /// Runs one simulation tick.
    pub fn tick(&mut self) -> TickReport {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick, &mut events);

        if !query::status(&self.world).is_terminal() {
            let mut commands = Vec::new();
            self.pursuit.handle(
                &events,
                query::grid(&self.world),
                query::pursuer(&self.world),
                query::player(&self.world),
                &mut commands,
            );
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
            world::apply(&mut self.world, Command::SettleTick, &mut events);
        }

        trace!(?events, "tick complete");
        TickReport {
            events,
            status: query::status(&self.world),
        }
    }

    /// Replaces the maze, resetting both actors.
    pub fn load_maze(&mut self, maze: Maze) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::LoadMaze { maze }, &mut events);
        events
    }

    /// Read-only access to the underlying world for rendering and queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Overall progress of the session.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        query::status(&self.world)
    }

    /// Positions recorded at the end of every settled tick.
    #[must_use]
    pub fn log(&self) -> &SessionLog {
        query::session_log(&self.world)
    }

    /// Number of pursuit searches run so far.
    #[must_use]
    pub fn searches_run(&self) -> u64 {
        self.pursuit.searches_run()
    }
}
