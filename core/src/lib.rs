#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod difficulty;
mod error;
mod generator;
mod score;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Clamps to at least a 1×2 board holding between one mine and one safe cell less than the total.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(if rows == 1 { 2 } else { 1 });
        let mines = mines.clamp(1, mult(rows, cols) - 1);
        Self::new_unchecked(rows, cols, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Result of a single [`Board::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoChange,
    Mine,
    Expanded { opened: CellCount },
}

/// Result of a reveal at the session level, after the win/loss check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed what the player sees
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_mines_below_total() {
        assert_eq!(GameConfig::new(3, 3, 40), GameConfig::new_unchecked(3, 3, 8));
        assert_eq!(GameConfig::new(3, 3, 0).mines, 1);
        assert_eq!(GameConfig::new(0, 0, 5), GameConfig::new_unchecked(1, 2, 1));
    }

    #[test]
    fn config_safe_cells() {
        assert_eq!(GameConfig::new(8, 8, 10).safe_cells(), 54);
    }
}
