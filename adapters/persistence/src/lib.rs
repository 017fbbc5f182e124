#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Flat-file persistence for mazes and session logs.
//!
//! Maze files are plain text:
//!
//! ```text
//! <columns> <rows>
//! <entrance column> <entrance row>
//! <exit column> <exit row>
//! <rows lines of `columns` space-separated tokens, 0 = open, 1 = wall>
//! ```
//!
//! Session logs are exported as a JSON array of per-tick records.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use maze_chase_core::{CellCoord, CellState, Grid, Maze, MazeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const OPEN_TOKEN: &str = "0";
const WALL_TOKEN: &str = "1";

/// Errors raised while reading or writing persisted data.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The underlying file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header line is missing.
    #[error("missing {what} line")]
    MissingLine {
        /// Header that was expected.
        what: &'static str,
    },

    /// A header line does not hold exactly two numbers.
    #[error("line {line}: expected 2 values, found {found}")]
    WrongFieldCount {
        /// One-based line number.
        line: usize,
        /// Number of tokens present.
        found: usize,
    },

    /// A header token is not a non-negative integer.
    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A grid token is neither `0` nor `1`.
    #[error("line {line}: `{token}` is not a cell value (expected 0 or 1)")]
    InvalidCell {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The number of grid rows disagrees with the header.
    #[error("expected {expected} grid rows, found {found}")]
    RowCount {
        /// Rows declared in the header.
        expected: u32,
        /// Rows present in the file.
        found: usize,
    },

    /// A grid row has the wrong number of cells.
    #[error("line {line}: expected {expected} cells, found {found}")]
    ColumnCount {
        /// One-based line number.
        line: usize,
        /// Columns declared in the header.
        expected: u32,
        /// Cells present on the line.
        found: usize,
    },

    /// The entrance or exit lies outside the declared grid.
    #[error("{what} {cell} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Which endpoint is invalid.
        what: &'static str,
        /// Offending coordinate.
        cell: CellCoord,
        /// Declared column count.
        columns: u32,
        /// Declared row count.
        rows: u32,
    },

    /// The entrance or exit is a wall.
    #[error(transparent)]
    Maze(#[from] MazeError),

    /// The two move sequences of a session log differ in length.
    #[error("player log has {player} entries but pursuer log has {pursuer}")]
    LengthMismatch {
        /// Player entries.
        player: usize,
        /// Pursuer entries.
        pursuer: usize,
    },

    /// The session log could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the persistence adapter.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Renders a maze using the text format described in the crate docs.
#[must_use]
pub fn encode_maze(maze: &Maze) -> String {
    let grid = maze.grid();
    let mut text = format!(
        "{} {}\n{} {}\n{} {}\n",
        grid.columns(),
        grid.rows(),
        maze.entrance().column(),
        maze.entrance().row(),
        maze.exit().column(),
        maze.exit().row(),
    );

    for row in 0..grid.rows() {
        let tokens: Vec<&str> = (0..grid.columns())
            .map(|column| {
                if grid.is_open(CellCoord::new(column, row)) {
                    OPEN_TOKEN
                } else {
                    WALL_TOKEN
                }
            })
            .collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }

    text
}

/// Parses a maze from the text format, validating every field.
pub fn decode_maze(text: &str) -> Result<Maze> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    let (columns, rows) = parse_pair(lines.next(), "dimension")?;
    let (entrance_column, entrance_row) = parse_pair(lines.next(), "entrance")?;
    let (exit_column, exit_row) = parse_pair(lines.next(), "exit")?;
    let entrance = CellCoord::new(entrance_column, entrance_row);
    let exit = CellCoord::new(exit_column, exit_row);

    let row_lines: Vec<(usize, &str)> = lines.filter(|(_, line)| !line.trim().is_empty()).collect();
    if u32::try_from(row_lines.len()).ok() != Some(rows) {
        return Err(PersistenceError::RowCount {
            expected: rows,
            found: row_lines.len(),
        });
    }

    let mut cells = Vec::new();
    for (line, content) in row_lines {
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if u32::try_from(tokens.len()).ok() != Some(columns) {
            return Err(PersistenceError::ColumnCount {
                line,
                expected: columns,
                found: tokens.len(),
            });
        }

        cells.reserve(tokens.len());
        for token in tokens {
            let state = match token {
                OPEN_TOKEN => CellState::Open,
                WALL_TOKEN => CellState::Wall,
                other => {
                    return Err(PersistenceError::InvalidCell {
                        line,
                        token: other.to_owned(),
                    })
                }
            };
            cells.push(state);
        }
    }

    let grid = Grid::from_cells(columns, rows, cells).ok_or(PersistenceError::RowCount {
        expected: rows,
        found: 0,
    })?;

    for (what, cell) in [("entrance", entrance), ("exit", exit)] {
        if !grid.contains(cell) {
            return Err(PersistenceError::OutOfBounds {
                what,
                cell,
                columns,
                rows,
            });
        }
    }

    Ok(Maze::new(grid, entrance, exit)?)
}

/// Writes `maze` to `path`, replacing any existing file.
pub fn save_maze(path: impl AsRef<Path>, maze: &Maze) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode_maze(maze))?;
    info!(path = %path.display(), "maze saved");
    Ok(())
}

/// Reads and validates a maze from `path`.
pub fn load_maze(path: impl AsRef<Path>) -> Result<Maze> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let maze = decode_maze(&text)?;
    info!(
        path = %path.display(),
        columns = maze.grid().columns(),
        rows = maze.grid().rows(),
        "maze loaded"
    );
    Ok(maze)
}

/// Positions of both actors at the end of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Zero-based index of the settled tick.
    pub tick: u64,
    /// Player cell.
    pub player: CellCoord,
    /// Pursuer cell.
    pub pursuer: CellCoord,
}

/// Pairs two equal-length move sequences into per-tick records.
pub fn pair_moves(player: &[CellCoord], pursuer: &[CellCoord]) -> Result<Vec<TickRecord>> {
    if player.len() != pursuer.len() {
        return Err(PersistenceError::LengthMismatch {
            player: player.len(),
            pursuer: pursuer.len(),
        });
    }

    Ok(player
        .iter()
        .zip(pursuer)
        .zip(0u64..)
        .map(|((player, pursuer), tick)| TickRecord {
            tick,
            player: *player,
            pursuer: *pursuer,
        })
        .collect())
}

/// Exports the player and pursuer move logs to `path` as JSON.
pub fn export_session_log(
    path: impl AsRef<Path>,
    player: &[CellCoord],
    pursuer: &[CellCoord],
) -> Result<()> {
    let path = path.as_ref();
    let records = pair_moves(player, pursuer)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.display(), ticks = records.len(), "session log exported");
    Ok(())
}

/// Reads a session log previously written by [`export_session_log`].
pub fn read_session_log(path: impl AsRef<Path>) -> Result<Vec<TickRecord>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn parse_pair(line: Option<(usize, &str)>, what: &'static str) -> Result<(u32, u32)> {
    let (line, content) = line.ok_or(PersistenceError::MissingLine { what })?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let [first, second] = tokens.as_slice() else {
        return Err(PersistenceError::WrongFieldCount {
            line,
            found: tokens.len(),
        });
    };

    Ok((parse_number(line, first)?, parse_number(line, second)?))
}

fn parse_number(line: usize, token: &str) -> Result<u32> {
    token.parse().map_err(|_| PersistenceError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "3 3\n1 1\n1 1\n1 1 1\n1 0 1\n1 1 1\n";

    #[test]
    fn decodes_minimal_maze() {
        let maze = decode_maze(SMALL).expect("valid maze");
        assert_eq!(maze.grid().open_count(), 1);
        assert_eq!(maze.entrance(), CellCoord::new(1, 1));
        assert_eq!(encode_maze(&maze), SMALL);
    }

    #[test]
    fn rejects_bad_header() {
        assert!(matches!(
            decode_maze(""),
            Err(PersistenceError::MissingLine { what: "dimension" })
        ));
        assert!(matches!(
            decode_maze("3 3 3\n"),
            Err(PersistenceError::WrongFieldCount { line: 1, found: 3 })
        ));
        assert!(matches!(
            decode_maze("3 x\n"),
            Err(PersistenceError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn pair_moves_numbers_ticks() {
        let player = [CellCoord::new(1, 1), CellCoord::new(2, 1)];
        let pursuer = [CellCoord::new(5, 5), CellCoord::new(4, 5)];
        let records = pair_moves(&player, &pursuer).expect("equal lengths");
        assert_eq!(records[1].tick, 1);
        assert_eq!(records[1].pursuer, CellCoord::new(4, 5));
    }
}
