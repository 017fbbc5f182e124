#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Maze Chase.

pub mod navigation;

use maze_chase_core::{
    CellCoord, Command, Event, GameConfig, Grid, Maze, Path, SessionLog, SessionStatus,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Represents the authoritative Maze Chase session state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    entrance: CellCoord,
    exit: CellCoord,
    hint: Path,
    player: CellCoord,
    pursuer: CellCoord,
    lives: u32,
    status: SessionStatus,
    show_path: bool,
    tick_index: u64,
    log: SessionLog,
    rng: ChaCha8Rng,
    max_respawn_attempts: u32,
}

impl World {
    /// Creates a session on the provided maze.
    ///
    /// The player starts on the entrance and the pursuer on a random open cell.
    /// `seed` drives every random respawn so sessions replay deterministically.
    #[must_use]
    pub fn new(maze: Maze, config: &GameConfig, seed: u64) -> Self {
        let (grid, entrance, exit) = maze.into_parts();
        let hint = navigation::shortest_path(&grid, entrance, exit);
        let mut world = Self {
            grid,
            entrance,
            exit,
            hint,
            player: entrance,
            pursuer: entrance,
            lives: config.starting_lives(),
            status: SessionStatus::Roaming,
            show_path: false,
            tick_index: 0,
            log: SessionLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_respawn_attempts: config.max_respawn_attempts(),
        };
        world.place_pursuer(&[entrance]);
        info!(
            columns = world.grid.columns(),
            rows = world.grid.rows(),
            hint_steps = world.hint.steps(),
            pursuer = %world.pursuer,
            "session started"
        );
        world
    }

    /// Moves the pursuer to a random open interior cell outside `excluded`.
    ///
    /// Callers always exclude the entrance, unlike a plain uniform pick, so a
    /// freshly placed pursuer never starts on top of the player.
    fn place_pursuer(&mut self, excluded: &[CellCoord]) {
        match sample_open_cell(
            &self.grid,
            &mut self.rng,
            self.max_respawn_attempts,
            excluded,
        ) {
            Some(cell) => self.pursuer = cell,
            None => warn!(pursuer = %self.pursuer, "no open cell available for the pursuer"),
        }
    }

    fn resolve_collision(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player;
        self.lives = self.lives.saturating_sub(1);
        out_events.push(Event::Collided {
            cell,
            lives_remaining: self.lives,
        });

        if self.lives == 0 {
            self.status = SessionStatus::Lost;
            out_events.push(Event::Lost);
            info!(%cell, "player caught with no lives left");
            return;
        }

        self.player = self.entrance;
        let entrance = self.entrance;
        self.place_pursuer(&[cell, entrance]);
        info!(%cell, lives = self.lives, pursuer = %self.pursuer, "player caught, respawning");
        out_events.push(Event::Respawned {
            player: self.player,
            pursuer: self.pursuer,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session is won or lost only [`Command::TogglePathDisplay`] has an
/// effect.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Command::TogglePathDisplay = command {
        world.show_path = !world.show_path;
        out_events.push(Event::PathDisplayToggled {
            visible: world.show_path,
        });
        return;
    }

    if world.status.is_terminal() {
        debug!(status = ?world.status, ?command, "ignoring command after session end");
        return;
    }

    match command {
        Command::MovePlayer { direction } => {
            let from = world.player;
            match from
                .neighbor(direction)
                .filter(|cell| world.grid.is_open(*cell))
            {
                Some(to) => {
                    world.player = to;
                    out_events.push(Event::PlayerMoved { from, to });
                }
                None => out_events.push(Event::PlayerBlocked { from, direction }),
            }
        }
        Command::Tick => {
            if world.player == world.exit {
                world.status = SessionStatus::Won;
                out_events.push(Event::Won { cell: world.exit });
                info!(ticks = world.tick_index, lives = world.lives, "player reached the exit");
                return;
            }

            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
            world.tick_index = world.tick_index.saturating_add(1);
        }
        Command::StepPursuer { to } => {
            let from = world.pursuer;
            if from.is_adjacent(to) && world.grid.is_open(to) {
                world.pursuer = to;
                out_events.push(Event::PursuerAdvanced { from, to });
            } else {
                warn!(%from, %to, "rejected pursuer step");
                out_events.push(Event::PursuerStepRejected { from, to });
            }
        }
        Command::SettleTick => {
            world.log.record(world.player, world.pursuer);
            if world.player == world.pursuer {
                world.resolve_collision(out_events);
            }
        }
        Command::LoadMaze { maze } => {
            let (grid, entrance, exit) = maze.into_parts();
            world.hint = navigation::shortest_path(&grid, entrance, exit);
            world.grid = grid;
            world.entrance = entrance;
            world.exit = exit;
            world.player = entrance;
            world.place_pursuer(&[entrance]);
            info!(%entrance, %exit, hint_steps = world.hint.steps(), "maze replaced");
            out_events.push(Event::MazeLoaded { entrance, exit });
        }
        Command::TogglePathDisplay => {}
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{navigation, World};
    use maze_chase_core::{CellCoord, Grid, Path, SessionLog, SessionStatus};

    /// Provides read-only access to the maze layout.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Cell where the player starts and respawns.
    #[must_use]
    pub fn entrance(world: &World) -> CellCoord {
        world.entrance
    }

    /// Cell the player must reach.
    #[must_use]
    pub fn exit(world: &World) -> CellCoord {
        world.exit
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Cell currently occupied by the pursuer.
    #[must_use]
    pub fn pursuer(world: &World) -> CellCoord {
        world.pursuer
    }

    /// Lives left to the player.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Overall progress of the session.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.status
    }

    /// Whether the hint trail should be drawn.
    #[must_use]
    pub fn show_path(world: &World) -> bool {
        world.show_path
    }

    /// Shortest entrance-to-exit route computed when the maze was installed.
    #[must_use]
    pub fn hint_path(world: &World) -> &Path {
        &world.hint
    }

    /// Number of ticks opened so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Positions recorded at the end of every settled tick.
    #[must_use]
    pub fn session_log(world: &World) -> &SessionLog {
        &world.log
    }

    /// Shortest route between two cells of the world's maze.
    #[must_use]
    pub fn shortest_path(world: &World, from: CellCoord, to: CellCoord) -> Path {
        navigation::shortest_path(&world.grid, from, to)
    }
}

fn sample_open_cell(
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    attempts: u32,
    excluded: &[CellCoord],
) -> Option<CellCoord> {
    let columns = grid.columns();
    let rows = grid.rows();

    if columns >= 3 && rows >= 3 {
        for _ in 0..attempts {
            let candidate = CellCoord::new(
                rng.gen_range(1..=columns - 2),
                rng.gen_range(1..=rows - 2),
            );
            if grid.is_open(candidate) && !excluded.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    warn!(attempts, "random respawn exhausted, scanning for an open cell");
    grid.open_cells().find(|cell| !excluded.contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Direction;

    fn open_interior_maze(columns: u32, rows: u32) -> Maze {
        let mut grid = Grid::new(columns, rows);
        for row in 1..rows - 1 {
            for column in 1..columns - 1 {
                grid.set_open(CellCoord::new(column, row));
            }
        }
        Maze::new(
            grid,
            CellCoord::new(1, 1),
            CellCoord::new(columns - 2, rows - 2),
        )
        .expect("open endpoints")
    }

    fn world_with_lives(lives: u32) -> World {
        let config = GameConfig::default()
            .with_dimensions(9, 9)
            .with_starting_lives(lives);
        World::new(open_interior_maze(9, 9), &config, 7)
    }

    #[test]
    fn collision_decrements_lives_and_respawns_both_actors() {
        let mut world = world_with_lives(3);
        let meeting = CellCoord::new(5, 5);
        world.player = meeting;
        world.pursuer = meeting;

        let mut events = Vec::new();
        apply(&mut world, Command::SettleTick, &mut events);

        assert_eq!(query::lives(&world), 2);
        assert_eq!(query::player(&world), CellCoord::new(1, 1));
        let pursuer = query::pursuer(&world);
        assert_ne!(pursuer, meeting, "pursuer must leave the collision cell");
        assert!(query::grid(&world).is_open(pursuer));
        assert_eq!(query::status(&world), SessionStatus::Roaming);
        assert_eq!(
            events,
            vec![
                Event::Collided {
                    cell: meeting,
                    lives_remaining: 2
                },
                Event::Respawned {
                    player: CellCoord::new(1, 1),
                    pursuer,
                },
            ]
        );
    }

    #[test]
    fn last_life_transitions_to_lost_once_and_freezes_positions() {
        let mut world = world_with_lives(1);
        let meeting = CellCoord::new(4, 3);
        world.player = meeting;
        world.pursuer = meeting;

        let mut events = Vec::new();
        apply(&mut world, Command::SettleTick, &mut events);
        assert_eq!(query::status(&world), SessionStatus::Lost);
        assert_eq!(
            events.iter().filter(|event| **event == Event::Lost).count(),
            1
        );

        let mut later = Vec::new();
        apply(&mut world, Command::SettleTick, &mut later);
        apply(&mut world, Command::Tick, &mut later);
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut later,
        );
        apply(
            &mut world,
            Command::StepPursuer {
                to: CellCoord::new(5, 3),
            },
            &mut later,
        );

        assert!(later.is_empty(), "terminal session must not emit events");
        assert_eq!(query::player(&world), meeting);
        assert_eq!(query::pursuer(&world), meeting);
        assert_eq!(query::lives(&world), 0);
        assert_eq!(query::session_log(&world).len(), 1);
    }

    #[test]
    fn tick_on_exit_wins_before_collision() {
        let mut world = world_with_lives(3);
        let exit = query::exit(&world);
        world.player = exit;
        world.pursuer = exit;

        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(events, vec![Event::Won { cell: exit }]);
        assert_eq!(query::status(&world), SessionStatus::Won);
        assert_eq!(query::lives(&world), 3);
    }

    #[test]
    fn respawn_sampling_never_returns_a_wall() {
        let maze = open_interior_maze(11, 11);
        let (mut grid, _, _) = maze.into_parts();
        grid = checkerboard(&grid);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..500 {
            let cell = sample_open_cell(&grid, &mut rng, 64, &[]).expect("open cell exists");
            assert!(grid.is_open(cell), "{cell} is a wall");
        }
    }

    #[test]
    fn respawn_falls_back_to_scan_when_sampling_fails() {
        let mut grid = Grid::new(5, 5);
        grid.set_open(CellCoord::new(3, 2));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let cell = sample_open_cell(&grid, &mut rng, 0, &[]);
        assert_eq!(cell, Some(CellCoord::new(3, 2)));
        assert_eq!(
            sample_open_cell(&grid, &mut rng, 16, &[CellCoord::new(3, 2)]),
            None
        );
    }

    fn checkerboard(source: &Grid) -> Grid {
        let mut grid = Grid::new(source.columns(), source.rows());
        for cell in source.open_cells() {
            if (cell.column() + cell.row()) % 2 == 0 {
                grid.set_open(cell);
            }
        }
        grid
    }
}
