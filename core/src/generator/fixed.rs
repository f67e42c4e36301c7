use alloc::vec::Vec;

use super::*;

/// Places a predetermined layout, ignoring where the first reveal lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinePlacer {
    mines: Vec<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place(self, board: &mut Board, mine_count: CellCount, safe: Coord2) -> Result<()> {
        let mut distinct = self.mines.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let actual = distinct.len() as CellCount;
        if actual != mine_count {
            return Err(GameError::MineCountMismatch {
                expected: mine_count,
                actual,
            });
        }

        board.place_mines_at(&distinct)?;
        if board.cell(safe).is_some_and(|cell| cell.is_mine()) {
            log::debug!("Fixed layout puts a mine under the first reveal at {:?}", safe);
        }
        Ok(())
    }
}
