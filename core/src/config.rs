//! Tunable parameters shared by every crate.

use crate::CellCoord;

const DEFAULT_COLUMNS: u32 = 41;
const DEFAULT_ROWS: u32 = 41;
const DEFAULT_CELL_SIZE: u32 = 20;
const DEFAULT_EXTRA_OPENING_DIVISOR: u32 = 5;
const DEFAULT_PURSUER_CADENCE: u32 = 2;
const DEFAULT_STARTING_LIVES: u32 = 3;
const DEFAULT_TICK_RATE_HZ: u32 = 10;
const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 64;
const DEFAULT_MAX_RESPAWN_ATTEMPTS: u32 = 4_096;

/// Configuration for a single game session.
///
/// | Parameter | Default |
/// | --- | --- |
/// | columns × rows | 41 × 41 |
/// | cell size | 20 px |
/// | extra openings | area / 5 |
/// | pursuer cadence | every 2 ticks |
/// | starting lives | 3 |
/// | tick rate | 10 Hz |
/// | generation attempts | 64 |
/// | respawn samples | 4096 |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    columns: u32,
    rows: u32,
    cell_size: u32,
    extra_opening_divisor: u32,
    pursuer_cadence: u32,
    starting_lives: u32,
    tick_rate_hz: u32,
    max_generation_attempts: u32,
    max_respawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            extra_opening_divisor: DEFAULT_EXTRA_OPENING_DIVISOR,
            pursuer_cadence: DEFAULT_PURSUER_CADENCE,
            starting_lives: DEFAULT_STARTING_LIVES,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            max_respawn_attempts: DEFAULT_MAX_RESPAWN_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Overrides the grid dimensions.
    #[must_use]
    pub const fn with_dimensions(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Overrides the on-screen size of a cell in pixels.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Overrides the divisor applied to the grid area to count extra openings.
    ///
    /// Zero disables extra openings.
    #[must_use]
    pub const fn with_extra_opening_divisor(mut self, divisor: u32) -> Self {
        self.extra_opening_divisor = divisor;
        self
    }

    /// Overrides how many ticks elapse between pursuer steps.
    #[must_use]
    pub const fn with_pursuer_cadence(mut self, cadence: u32) -> Self {
        self.pursuer_cadence = cadence;
        self
    }

    /// Overrides the number of lives the player starts with.
    #[must_use]
    pub const fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Overrides the tick rate used by real-time adapters.
    #[must_use]
    pub const fn with_tick_rate_hz(mut self, tick_rate_hz: u32) -> Self {
        self.tick_rate_hz = tick_rate_hz;
        self
    }

    /// Overrides the number of generation attempts before giving up.
    #[must_use]
    pub const fn with_max_generation_attempts(mut self, attempts: u32) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    /// Overrides the number of random samples drawn when respawning the pursuer.
    #[must_use]
    pub const fn with_max_respawn_attempts(mut self, attempts: u32) -> Self {
        self.max_respawn_attempts = attempts;
        self
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// On-screen size of a cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Divisor applied to the grid area to count extra openings.
    #[must_use]
    pub const fn extra_opening_divisor(&self) -> u32 {
        self.extra_opening_divisor
    }

    /// Number of extra openings punched after carving.
    #[must_use]
    pub const fn extra_openings(&self) -> u64 {
        if self.extra_opening_divisor == 0 {
            return 0;
        }
        (self.columns as u64 * self.rows as u64) / self.extra_opening_divisor as u64
    }

    /// Ticks between pursuer steps, never zero.
    #[must_use]
    pub const fn pursuer_cadence(&self) -> u32 {
        if self.pursuer_cadence == 0 {
            1
        } else {
            self.pursuer_cadence
        }
    }

    /// Lives granted at session start.
    #[must_use]
    pub const fn starting_lives(&self) -> u32 {
        self.starting_lives
    }

    /// Ticks per second for real-time pacing, never zero.
    #[must_use]
    pub const fn tick_rate_hz(&self) -> u32 {
        if self.tick_rate_hz == 0 {
            1
        } else {
            self.tick_rate_hz
        }
    }

    /// Upper bound on discarded generation attempts.
    #[must_use]
    pub const fn max_generation_attempts(&self) -> u32 {
        self.max_generation_attempts
    }

    /// Upper bound on random respawn samples.
    #[must_use]
    pub const fn max_respawn_attempts(&self) -> u32 {
        self.max_respawn_attempts
    }

    /// Cell where the player starts.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        CellCoord::new(1, 1)
    }

    /// Cell the player must reach: the interior corner opposite the entrance.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        CellCoord::new(self.columns.saturating_sub(2), self.rows.saturating_sub(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_cadence() {
        let config = GameConfig::default();
        assert_eq!(config.pursuer_cadence(), 2);
        assert_eq!(config.starting_lives(), 3);
        assert_eq!(config.tick_rate_hz(), 10);
        assert_eq!(config.extra_openings(), 41 * 41 / 5);
        assert_eq!(config.exit(), CellCoord::new(39, 39));
    }

    #[test]
    fn zero_cadence_is_clamped() {
        let config = GameConfig::default().with_pursuer_cadence(0);
        assert_eq!(config.pursuer_cadence(), 1);
    }

    #[test]
    fn zero_divisor_disables_extra_openings() {
        let config = GameConfig::default().with_extra_opening_divisor(0);
        assert_eq!(config.extra_openings(), 0);
    }
}
