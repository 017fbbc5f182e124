#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuit system that re-plans an A* route toward the player on a throttled
//! cadence and proposes one pursuer step at a time.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
};

use maze_chase_core::{CellCoord, Command, Event, GameConfig, Grid, Path};
use tracing::debug;

/// Pure system that reacts to world events and emits pursuer step commands.
#[derive(Debug)]
pub struct Pursuit {
    cadence: u32,
    searches: u64,
}

impl Pursuit {
    /// Creates a pursuit system that moves once every `cadence` ticks.
    ///
    /// A cadence of zero behaves like one.
    #[must_use]
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            searches: 0,
        }
    }

    /// Creates a pursuit system using the configured cadence.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.pursuer_cadence())
    }

    /// Consumes world events and the current actor positions to emit at most
    /// one step command per on-cadence tick.
    ///
    /// Off-cadence ticks never run a search. When no route exists, or the
    /// pursuer already shares the player's cell, nothing is emitted.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: &Grid,
        pursuer: CellCoord,
        player: CellCoord,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            let Event::TimeAdvanced { tick } = event else {
                continue;
            };

            if tick % u64::from(self.cadence) != 0 {
                continue;
            }

            self.searches = self.searches.saturating_add(1);
            let route = astar(grid, pursuer, player);
            match route.first_step() {
                Some(to) => {
                    debug!(tick, %pursuer, %to, remaining = route.steps(), "pursuer step planned");
                    out.push(Command::StepPursuer { to });
                }
                None => debug!(tick, %pursuer, %player, "pursuer holds position"),
            }
        }
    }

    /// Number of searches run so far.
    #[must_use]
    pub fn searches_run(&self) -> u64 {
        self.searches
    }
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Frontier entry of the A* search.
///
/// The ordering makes [`BinaryHeap`] pop the lowest `f` first. Ties prefer the
/// node with the larger `g` (the one further along its route), then the
/// smaller cell in `(column, row)` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    f: u32,
    g: u32,
    cell: CellCoord,
}

impl SearchNode {
    /// Creates a node for `cell` reached after `g` moves with heuristic `h`.
    #[must_use]
    pub const fn new(cell: CellCoord, g: u32, h: u32) -> Self {
        Self {
            f: g.saturating_add(h),
            g,
            cell,
        }
    }

    /// Estimated total route length through this node.
    #[must_use]
    pub const fn f(&self) -> u32 {
        self.f
    }

    /// Moves taken from the start.
    #[must_use]
    pub const fn g(&self) -> u32 {
        self.g
    }

    /// Cell represented by the node.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest route from `start` to `goal` guided by the Manhattan
/// distance.
///
/// The heuristic never overestimates on a four-connected unit-cost grid, so the
/// route has the same number of moves as a breadth-first search would find.
/// Returns [`Path::empty`] when either endpoint is closed or unreachable.
#[must_use]
pub fn astar(grid: &Grid, start: CellCoord, goal: CellCoord) -> Path {
    if !grid.is_open(start) || !grid.is_open(goal) {
        return Path::empty();
    }

    let mut frontier = BinaryHeap::new();
    let mut best_g: HashMap<CellCoord, u32> = HashMap::new();
    let mut came_from: HashMap<CellCoord, CellCoord> = HashMap::new();

    let _ = best_g.insert(start, 0);
    frontier.push(SearchNode::new(start, 0, start.manhattan_distance(goal)));

    while let Some(node) = frontier.pop() {
        let cell = node.cell();
        if cell == goal {
            return reconstruct(&came_from, start, goal);
        }

        if best_g.get(&cell).is_some_and(|best| node.g() > *best) {
            continue;
        }

        let next_g = node.g().saturating_add(1);
        for neighbor in grid.open_neighbors(cell) {
            if best_g.get(&neighbor).is_some_and(|best| *best <= next_g) {
                continue;
            }

            let _ = best_g.insert(neighbor, next_g);
            let _ = came_from.insert(neighbor, cell);
            frontier.push(SearchNode::new(
                neighbor,
                next_g,
                neighbor.manhattan_distance(goal),
            ));
        }
    }

    Path::empty()
}

fn reconstruct(
    came_from: &HashMap<CellCoord, CellCoord>,
    start: CellCoord,
    goal: CellCoord,
) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;

    while current != start {
        let Some(&previous) = came_from.get(&current) else {
            return Path::empty();
        };
        cells.push(previous);
        current = previous;
    }

    cells.reverse();
    Path::from_cells(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(SearchNode::new(CellCoord::new(0, 0), 3, 4));
        heap.push(SearchNode::new(CellCoord::new(1, 0), 2, 2));
        heap.push(SearchNode::new(CellCoord::new(2, 0), 5, 0));

        let order: Vec<u32> = std::iter::from_fn(|| heap.pop().map(|node| node.f())).collect();
        assert_eq!(order, vec![4, 5, 7]);
    }

    #[test]
    fn equal_f_prefers_deeper_node_then_smaller_cell() {
        let shallow = SearchNode::new(CellCoord::new(0, 0), 1, 5);
        let deep = SearchNode::new(CellCoord::new(9, 9), 4, 2);
        assert!(deep > shallow, "larger g wins ties on f");

        let left = SearchNode::new(CellCoord::new(1, 2), 3, 3);
        let right = SearchNode::new(CellCoord::new(2, 1), 3, 3);
        assert!(left > right, "smaller cell wins full ties");
    }

    #[test]
    fn zero_cadence_moves_every_tick() {
        let mut grid = Grid::new(3, 1);
        for column in 0..3 {
            grid.set_open(CellCoord::new(column, 0));
        }

        let mut pursuit = Pursuit::new(0);
        let mut commands = Vec::new();
        pursuit.handle(
            &[Event::TimeAdvanced { tick: 1 }],
            &grid,
            CellCoord::new(0, 0),
            CellCoord::new(2, 0),
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::StepPursuer {
                to: CellCoord::new(1, 0)
            }]
        );
    }
}
