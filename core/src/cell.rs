use serde::{Deserialize, Serialize};

/// One square of the minefield.
///
/// Fields are only mutated by [`Board`](crate::Board), which keeps the invariant that a cell is never both
/// revealed and flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_mine_count: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Mines among the up-to-8 neighbors, zero until mines are placed.
    pub const fn neighbor_mine_count(self) -> u8 {
        self.neighbor_mine_count
    }

    /// Hidden and unflagged, the only state a reveal can act on.
    pub const fn is_openable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
