#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters, plus a plain-text
//! backend for terminals and logs.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use maze_chase_core::{CellCoord, Grid, Path, SessionStatus};

/// Everything an adapter needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Maze layout.
    pub grid: &'a Grid,
    /// Hint trail from the entrance to the exit.
    pub path: &'a Path,
    /// Entrance cell.
    pub entrance: CellCoord,
    /// Exit cell.
    pub exit: CellCoord,
    /// Player cell.
    pub player: CellCoord,
    /// Pursuer cell, if a pursuer is in play.
    pub pursuer: Option<CellCoord>,
    /// Lives left to the player.
    pub lives: u32,
    /// Whether the hint trail should be drawn.
    pub show_path: bool,
    /// Overall progress of the session.
    pub status: SessionStatus,
}

/// Characters used by [`TextRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Wall cell.
    pub wall: char,
    /// Open cell.
    pub open: char,
    /// Open cell on the visible hint trail.
    pub trail: char,
    /// Entrance cell.
    pub entrance: char,
    /// Exit cell.
    pub exit: char,
    /// Player.
    pub player: char,
    /// Pursuer.
    pub pursuer: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            wall: '#',
            open: '.',
            trail: '*',
            entrance: 'E',
            exit: 'X',
            player: 'P',
            pursuer: 'M',
        }
    }
}

/// Presents scenes to some output.
pub trait RenderingBackend {
    /// Draws a single frame.
    fn present(&mut self, scene: &Scene<'_>) -> AnyResult<()>;
}

/// Draws scenes as text, one character per cell.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
    glyphs: Glyphs,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer writing to `out` with the default glyphs.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            glyphs: Glyphs::default(),
        }
    }

    /// Replaces the glyph set.
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextRenderer<W> {
    fn present(&mut self, scene: &Scene<'_>) -> AnyResult<()> {
        let frame = render_text(scene, &self.glyphs);
        self.out
            .write_all(frame.as_bytes())
            .context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")
    }
}

/// Renders a scene into a multi-line string followed by a status footer.
///
/// Actors are drawn above the endpoints, which are drawn above the trail.
#[must_use]
pub fn render_text(scene: &Scene<'_>, glyphs: &Glyphs) -> String {
    let grid = scene.grid;
    let width = usize::try_from(grid.columns()).unwrap_or(0);
    let mut text = String::with_capacity((width + 1) * grid.rows() as usize + 32);

    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            text.push(glyph_for(scene, glyphs, cell));
        }
        text.push('\n');
    }

    text.push_str(&format!("Lives: {}", scene.lives));
    match scene.status {
        SessionStatus::Roaming => {}
        SessionStatus::Won => text.push_str("  You win!"),
        SessionStatus::Lost => text.push_str("  Game over!"),
    }
    text.push('\n');
    text
}

fn glyph_for(scene: &Scene<'_>, glyphs: &Glyphs, cell: CellCoord) -> char {
    if scene.pursuer == Some(cell) {
        glyphs.pursuer
    } else if cell == scene.player {
        glyphs.player
    } else if cell == scene.exit {
        glyphs.exit
    } else if cell == scene.entrance {
        glyphs.entrance
    } else if !scene.grid.is_open(cell) {
        glyphs.wall
    } else if scene.show_path && scene.path.contains(cell) {
        glyphs.trail
    } else {
        glyphs.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> (Grid, Path) {
        let mut grid = Grid::new(5, 3);
        let cells: Vec<_> = (1..4).map(|column| CellCoord::new(column, 1)).collect();
        for cell in &cells {
            grid.set_open(*cell);
        }
        (grid, Path::from_cells(cells))
    }

    fn scene<'a>(grid: &'a Grid, path: &'a Path, show_path: bool) -> Scene<'a> {
        Scene {
            grid,
            path,
            entrance: CellCoord::new(1, 1),
            exit: CellCoord::new(3, 1),
            player: CellCoord::new(1, 1),
            pursuer: Some(CellCoord::new(3, 1)),
            lives: 2,
            show_path,
            status: SessionStatus::Roaming,
        }
    }

    #[test]
    fn hidden_trail_draws_open_cells() {
        let (grid, path) = corridor();
        let text = render_text(&scene(&grid, &path, false), &Glyphs::default());
        assert_eq!(text, "#####\n#P.M#\n#####\nLives: 2\n");
    }

    #[test]
    fn visible_trail_is_drawn_under_actors() {
        let (grid, path) = corridor();
        let text = render_text(&scene(&grid, &path, true), &Glyphs::default());
        assert_eq!(text, "#####\n#P*M#\n#####\nLives: 2\n");
    }

    #[test]
    fn backend_writes_frame_and_status() {
        let (grid, path) = corridor();
        let mut finished = scene(&grid, &path, false);
        finished.status = SessionStatus::Lost;
        finished.lives = 0;

        let mut renderer = TextRenderer::new(Vec::new());
        renderer.present(&finished).expect("write to vec");
        let written = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(written.ends_with("Lives: 0  Game over!\n"), "{written}");
    }
}
