#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query the immutable [`Grid`], and
//! respond exclusively with new command batches.

mod config;
mod grid;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::GameConfig;
pub use grid::{CellState, Grid};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that the player advance a single cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Flips visibility of the hint trail.
    TogglePathDisplay,
    /// Opens a new simulation tick.
    Tick,
    /// Requests that the pursuer advance onto the provided neighbouring cell.
    StepPursuer {
        /// Cell the pursuer should occupy after the step.
        to: CellCoord,
    },
    /// Closes the current tick: records positions and resolves collisions.
    SettleTick,
    /// Replaces the maze, resetting both actors.
    LoadMaze {
        /// Maze that becomes authoritative for the session.
        maze: Maze,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that a player move was refused because the target is not open.
    PlayerBlocked {
        /// Cell the player still occupies.
        from: CellCoord,
        /// Direction that was requested.
        direction: Direction,
    },
    /// Announces the new visibility of the hint trail.
    PathDisplayToggled {
        /// Whether the trail is now shown.
        visible: bool,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Zero-based index of the tick that just opened.
        tick: u64,
    },
    /// Confirms that the pursuer moved between two cells.
    PursuerAdvanced {
        /// Cell the pursuer occupied before moving.
        from: CellCoord,
        /// Cell the pursuer occupies after moving.
        to: CellCoord,
    },
    /// Reports that a pursuer step was refused.
    PursuerStepRejected {
        /// Cell the pursuer still occupies.
        from: CellCoord,
        /// Cell that was requested.
        to: CellCoord,
    },
    /// Reports that the player and the pursuer met on the same cell.
    Collided {
        /// Cell shared by both actors.
        cell: CellCoord,
        /// Lives left after the collision was charged.
        lives_remaining: u32,
    },
    /// Confirms that both actors were relocated after a collision.
    Respawned {
        /// Cell the player was returned to.
        player: CellCoord,
        /// Cell the pursuer was relocated to.
        pursuer: CellCoord,
    },
    /// The player reached the exit.
    Won {
        /// Exit cell occupied by the player.
        cell: CellCoord,
    },
    /// The last life was lost.
    Lost,
    /// Confirms that a replacement maze became authoritative.
    MazeLoaded {
        /// Entrance of the new maze.
        entrance: CellCoord,
        /// Exit of the new maze.
        exit: CellCoord,
    },
}

/// Describes the overall progress of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Normal play; both actors move.
    Roaming,
    /// The player reached the exit.
    Won,
    /// The player ran out of lives.
    Lost,
}

impl SessionStatus {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Neighbour enumeration order shared by every search.
    pub const ALL: [Direction; 4] = [Self::West, Self::East, Self::North, Self::South];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the neighbouring cell in `direction`, or `None` when the step
    /// would leave the non-negative quadrant.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Direction of a single step from `self` to `other`, if they are adjacent.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }

        if other.column > self.column {
            Some(Direction::East)
        } else if other.column < self.column {
            Some(Direction::West)
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Ordered route between two cells, endpoints included.
///
/// An empty path means no route exists. A path from a cell to itself holds
/// that single cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// The "no route" value.
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Wraps an ordered list of cells.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }

    /// Reports whether the path represents "no route".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells visited by the path, start first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of single-cell moves required to walk the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First cell of the path.
    #[must_use]
    pub fn start(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    #[must_use]
    pub fn goal(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Cell reached after the first move, if any move is required.
    #[must_use]
    pub fn first_step(&self) -> Option<CellCoord> {
        self.cells.get(1).copied()
    }

    /// Reports whether the path passes through `cell`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Checks that every cell is open in `grid` and consecutive cells are
    /// four-adjacent.
    #[must_use]
    pub fn is_walkable_in(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|cell| grid.is_open(*cell))
            && self
                .cells
                .windows(2)
                .all(|pair| pair[0].is_adjacent(pair[1]))
    }
}

/// Grid together with its entrance and exit.
///
/// Both endpoints are guaranteed to be open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    entrance: CellCoord,
    exit: CellCoord,
}

impl Maze {
    /// Assembles a maze, rejecting endpoints that are walls or out of bounds.
    pub fn new(grid: Grid, entrance: CellCoord, exit: CellCoord) -> Result<Self, MazeError> {
        if !grid.is_open(entrance) {
            return Err(MazeError::EntranceClosed { cell: entrance });
        }
        if !grid.is_open(exit) {
            return Err(MazeError::ExitClosed { cell: exit });
        }

        Ok(Self {
            grid,
            entrance,
            exit,
        })
    }

    /// Cell layout of the maze.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell where the player starts and respawns.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        self.entrance
    }

    /// Cell the player must reach.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Splits the maze into its grid and endpoints.
    #[must_use]
    pub fn into_parts(self) -> (Grid, CellCoord, CellCoord) {
        (self.grid, self.entrance, self.exit)
    }
}

/// Append-only record of actor positions, one entry per settled tick.
///
/// The player and pursuer sequences always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionLog {
    player: Vec<CellCoord>,
    pursuer: Vec<CellCoord>,
}

impl SessionLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            player: Vec::new(),
            pursuer: Vec::new(),
        }
    }

    /// Appends the positions observed at the end of a tick.
    pub fn record(&mut self, player: CellCoord, pursuer: CellCoord) {
        self.player.push(player);
        self.pursuer.push(pursuer);
    }

    /// Player positions in tick order.
    #[must_use]
    pub fn player_moves(&self) -> &[CellCoord] {
        &self.player
    }

    /// Pursuer positions in tick order.
    #[must_use]
    pub fn pursuer_moves(&self) -> &[CellCoord] {
        &self.pursuer
    }

    /// Number of recorded ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.player.len()
    }

    /// Reports whether no tick has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player.is_empty()
    }
}

/// Reasons a [`Maze`] cannot be assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The entrance is a wall or lies outside the grid.
    #[error("entrance {cell} is not an open cell")]
    EntranceClosed {
        /// Offending entrance cell.
        cell: CellCoord,
    },
    /// The exit is a wall or lies outside the grid.
    #[error("exit {cell} is not an open cell")]
    ExitClosed {
        /// Offending exit cell.
        cell: CellCoord,
    },
}

/// Reasons maze generation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The configured grid cannot host an interior passage.
    #[error("maze dimensions {columns}x{rows} are too small; at least 3x3 is required")]
    InvalidDimensions {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Every attempt produced a maze without an entrance-to-exit route.
    #[error("no solvable maze found after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of discarded attempts.
        attempts: u32,
    },
}
