//! Breadth-first shortest-path search used for the hint trail.

use std::collections::VecDeque;

use maze_chase_core::{CellCoord, Grid, Path};

/// Finds the route with the fewest moves between two cells.
///
/// Neighbours are expanded in [`maze_chase_core::Direction::ALL`] order, so the
/// returned path is stable for a given grid. Returns [`Path::empty`] when
/// either endpoint is closed or the goal cannot be reached.
#[must_use]
pub fn shortest_path(grid: &Grid, from: CellCoord, to: CellCoord) -> Path {
    if !grid.is_open(from) || !grid.is_open(to) {
        return Path::empty();
    }

    let Ok(width) = usize::try_from(grid.columns()) else {
        return Path::empty();
    };
    let cell_count = grid.area();
    let mut visited = vec![false; cell_count];
    let mut came_from: Vec<Option<CellCoord>> = vec![None; cell_count];
    let mut queue = VecDeque::new();

    if let Some(slot) = index(width, from).and_then(|offset| visited.get_mut(offset)) {
        *slot = true;
    }
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            return reconstruct(&came_from, width, from, to);
        }

        for neighbor in grid.open_neighbors(cell) {
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };

            if visited[neighbor_index] {
                continue;
            }

            visited[neighbor_index] = true;
            came_from[neighbor_index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    Path::empty()
}

fn reconstruct(
    came_from: &[Option<CellCoord>],
    width: usize,
    from: CellCoord,
    to: CellCoord,
) -> Path {
    let mut cells = vec![to];
    let mut current = to;

    while current != from {
        let Some(previous) = index(width, current).and_then(|offset| came_from[offset]) else {
            return Path::empty();
        };
        cells.push(previous);
        current = previous;
    }

    cells.reverse();
    Path::from_cells(cells)
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
