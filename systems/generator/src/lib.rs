#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded maze generation: recursive-backtracker carve, extra openings and a
//! rejection loop that only accepts solvable layouts.

use maze_chase_core::{CellCoord, Direction, GameConfig, GenerationError, Grid, Maze};
use maze_chase_world::navigation::shortest_path;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Produces random, solvable mazes for a fixed configuration.
#[derive(Debug)]
pub struct Generator {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl Generator {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates mazes until one connects the entrance to the exit.
    ///
    /// Each attempt carves a fresh spanning tree, punches extra openings and
    /// opens both endpoints. Attempts without a route are discarded whole.
    pub fn generate(&mut self) -> Result<Maze, GenerationError> {
        let columns = self.config.columns();
        let rows = self.config.rows();
        if columns < 3 || rows < 3 {
            return Err(GenerationError::InvalidDimensions { columns, rows });
        }

        let entrance = self.config.entrance();
        let exit = self.config.exit();
        let attempts = self.config.max_generation_attempts();

        for attempt in 1..=attempts {
            let mut grid = self.carve();
            self.add_openings(&mut grid);
            grid.set_open(entrance);
            grid.set_open(exit);

            let route = shortest_path(&grid, entrance, exit);
            if route.is_empty() {
                warn!(attempt, "discarding maze without an entrance-to-exit route");
                continue;
            }

            if let Ok(maze) = Maze::new(grid, entrance, exit) {
                info!(attempt, columns, rows, steps = route.steps(), "maze generated");
                return Ok(maze);
            }
        }

        Err(GenerationError::AttemptsExhausted { attempts })
    }

    /// Carves a perfect maze with a randomized depth-first walk.
    ///
    /// Lattice nodes sit two cells apart starting at `(1, 1)`, so passages are
    /// always separated by single-cell walls. Every lattice node is reachable
    /// from the start once the stack drains.
    pub fn carve(&mut self) -> Grid {
        let mut grid = Grid::new(self.config.columns(), self.config.rows());
        let start = CellCoord::new(1, 1);
        if !is_interior(&grid, start) {
            return grid;
        }

        grid.set_open(start);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates = lattice_candidates(&grid, current);
            if candidates.is_empty() {
                let _ = stack.pop();
                continue;
            }

            let next = candidates[self.rng.gen_range(0..candidates.len())];
            grid.set_open(midpoint(current, next));
            grid.set_open(next);
            stack.push(next);
        }

        debug!(open = grid.open_count(), "spanning tree carved");
        grid
    }

    /// Opens `area / extra_opening_divisor` uniformly random interior cells,
    /// introducing loops and shortcuts.
    pub fn add_openings(&mut self, grid: &mut Grid) {
        let columns = grid.columns();
        let rows = grid.rows();
        if columns < 3 || rows < 3 {
            return;
        }

        for _ in 0..self.config.extra_openings() {
            let cell = CellCoord::new(
                self.rng.gen_range(1..=columns - 2),
                self.rng.gen_range(1..=rows - 2),
            );
            grid.set_open(cell);
        }
    }
}

fn lattice_candidates(grid: &Grid, cell: CellCoord) -> Vec<CellCoord> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| cell.neighbor(direction)?.neighbor(direction))
        .filter(|candidate| is_interior(grid, *candidate) && !grid.is_open(*candidate))
        .collect()
}

fn is_interior(grid: &Grid, cell: CellCoord) -> bool {
    cell.column() > 0
        && cell.row() > 0
        && cell.column() + 1 < grid.columns()
        && cell.row() + 1 < grid.rows()
}

fn midpoint(from: CellCoord, to: CellCoord) -> CellCoord {
    CellCoord::new(
        (from.column() + to.column()) / 2,
        (from.row() + to.row()) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_candidates_skip_border_and_open_cells() {
        let mut grid = Grid::new(7, 7);
        grid.set_open(CellCoord::new(3, 1));

        let candidates = lattice_candidates(&grid, CellCoord::new(1, 1));
        assert_eq!(candidates, vec![CellCoord::new(1, 3)]);
    }

    #[test]
    fn midpoint_lies_between_lattice_nodes() {
        assert_eq!(
            midpoint(CellCoord::new(1, 3), CellCoord::new(3, 3)),
            CellCoord::new(2, 3)
        );
        assert_eq!(
            midpoint(CellCoord::new(5, 5), CellCoord::new(5, 3)),
            CellCoord::new(5, 4)
        );
    }
}
