use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for laying mines on a fresh board once the first reveal is known.
pub trait MinePlacer {
    fn place(self, board: &mut Board, mine_count: CellCount, safe: Coord2) -> Result<()>;
}
