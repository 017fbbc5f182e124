use maze_chase_core::{CellCoord, Grid, Maze, MazeError};
use maze_chase_persistence::{
    decode_maze, encode_maze, export_session_log, load_maze, read_session_log, save_maze,
    PersistenceError, TickRecord,
};
use tempfile::tempdir;

fn sample_maze() -> Maze {
    let mut grid = Grid::new(5, 4);
    for cell in [(1, 1), (2, 1), (3, 1), (3, 2)] {
        grid.set_open(CellCoord::new(cell.0, cell.1));
    }
    Maze::new(grid, CellCoord::new(1, 1), CellCoord::new(3, 2)).expect("open endpoints")
}

#[test]
fn saved_maze_loads_back_identically() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("maze.txt");
    let maze = sample_maze();

    save_maze(&path, &maze).expect("save maze");
    let text = std::fs::read_to_string(&path).expect("read saved file");
    assert_eq!(
        text,
        "5 4\n1 1\n3 2\n1 1 1 1 1\n1 0 0 0 1\n1 1 1 0 1\n1 1 1 1 1\n"
    );

    let loaded = load_maze(&path).expect("load maze");
    assert_eq!(loaded, maze);
}

#[test]
fn trailing_blank_lines_are_tolerated() {
    let text = format!("{}\n\n", encode_maze(&sample_maze()));
    assert_eq!(decode_maze(&text).expect("valid maze"), sample_maze());
}

#[test]
fn malformed_grids_are_rejected() {
    let missing_row = "3 3\n1 1\n1 1\n1 1 1\n1 0 1\n";
    assert!(matches!(
        decode_maze(missing_row),
        Err(PersistenceError::RowCount {
            expected: 3,
            found: 2
        })
    ));

    let short_row = "3 3\n1 1\n1 1\n1 1 1\n1 0\n1 1 1\n";
    assert!(matches!(
        decode_maze(short_row),
        Err(PersistenceError::ColumnCount {
            line: 5,
            expected: 3,
            found: 2
        })
    ));

    let bad_token = "3 3\n1 1\n1 1\n1 1 1\n1 2 1\n1 1 1\n";
    assert!(matches!(
        decode_maze(bad_token),
        Err(PersistenceError::InvalidCell { line: 5, ref token }) if token == "2"
    ));
}

#[test]
fn oversized_header_width_is_rejected_without_allocating_it() {
    let text = "4294967295 3\n1 1\n1 1\n0\n0\n0\n";
    assert!(matches!(
        decode_maze(text),
        Err(PersistenceError::ColumnCount {
            line: 4,
            expected: 4_294_967_295,
            found: 1
        })
    ));
}

#[test]
fn endpoints_must_be_inside_and_open() {
    let outside = "3 3\n1 1\n4 1\n1 1 1\n1 0 1\n1 1 1\n";
    assert!(matches!(
        decode_maze(outside),
        Err(PersistenceError::OutOfBounds { what: "exit", .. })
    ));

    let walled = "3 3\n0 0\n1 1\n1 1 1\n1 0 1\n1 1 1\n";
    assert!(matches!(
        decode_maze(walled),
        Err(PersistenceError::Maze(MazeError::EntranceClosed { .. }))
    ));
}

#[test]
fn loading_a_missing_file_reports_io_error() {
    let dir = tempdir().expect("create temp dir");
    assert!(matches!(
        load_maze(dir.path().join("absent.txt")),
        Err(PersistenceError::Io(_))
    ));
}

#[test]
fn session_log_exports_one_record_per_tick() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("log.json");
    let player = [CellCoord::new(1, 1), CellCoord::new(2, 1), CellCoord::new(3, 1)];
    let pursuer = [CellCoord::new(5, 3), CellCoord::new(5, 3), CellCoord::new(4, 3)];

    export_session_log(&path, &player, &pursuer).expect("export log");
    let records = read_session_log(&path).expect("read log");

    assert_eq!(
        records,
        vec![
            TickRecord {
                tick: 0,
                player: player[0],
                pursuer: pursuer[0],
            },
            TickRecord {
                tick: 1,
                player: player[1],
                pursuer: pursuer[1],
            },
            TickRecord {
                tick: 2,
                player: player[2],
                pursuer: pursuer[2],
            },
        ]
    );
}

#[test]
fn mismatched_logs_are_not_written() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("log.json");

    let result = export_session_log(&path, &[CellCoord::new(1, 1)], &[]);
    assert!(matches!(
        result,
        Err(PersistenceError::LengthMismatch {
            player: 1,
            pursuer: 0
        })
    ));
    assert!(!path.exists());
}
