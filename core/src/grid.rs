//! Dense wall/open cell storage.

use crate::{CellCoord, Direction};

/// Traversability of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Blocks movement.
    Wall,
    /// Can be walked on.
    Open,
}

/// Rectangular maze layout stored in row-major order.
///
/// Dimensions are fixed at construction and every cell starts as a wall.
/// Queries outside the grid are never errors: they simply report a cell that
/// cannot be entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid of the requested size filled with walls.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![CellState::Wall; capacity],
        }
    }

    /// Builds a grid from row-major cell states.
    ///
    /// Returns `None` when the number of cells does not match the dimensions.
    #[must_use]
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<CellState>) -> Option<Self> {
        let expected = u64::from(columns) * u64::from(rows);
        if u64::try_from(cells.len()).ok()? != expected {
            return None;
        }

        Some(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// State of the cell, or `None` outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell can be entered.
    ///
    /// Walls and out-of-bounds cells both report `false`.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.state(cell) == Some(CellState::Open)
    }

    /// Marks the cell as open. Cells outside the grid are ignored.
    pub fn set_open(&mut self, cell: CellCoord) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = CellState::Open;
        }
    }

    /// Iterator over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Open)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % columns, index / columns))
            })
    }

    /// Number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == CellState::Open)
            .count()
    }

    /// Open four-connected neighbours of `cell` in [`Direction::ALL`] order.
    pub fn open_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.neighbor(direction))
            .filter(move |neighbor| self.is_open(*neighbor))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
