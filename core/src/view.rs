use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    /// The mine that ended the game.
    pub mine_hit: bool,
    /// Mines are only exposed once the game is lost.
    pub mine_visible: bool,
    pub neighbor_count: u8,
}

/// Read-only projection of a [`Session`] for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub difficulty: Difficulty,
    pub mine_count: CellCount,
    pub mines_left: i32,
    pub elapsed_secs: u32,
    pub status: GameStatus,
    pub cells: Array2<CellView>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let status = session.status();
        let triggered = session.triggered_mine();
        let cells = session.board().cells();
        let cells = Array2::from_shape_fn(cells.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            cell_view(cells[coords.to_nd_index()], status, triggered == Some(coords))
        });

        Self {
            difficulty: session.difficulty(),
            mine_count: session.config().mines,
            mines_left: session.mines_left(),
            elapsed_secs: session.elapsed_secs(),
            status,
            cells,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

fn cell_view(cell: Cell, status: GameStatus, mine_hit: bool) -> CellView {
    let mine_visible = cell.is_mine() && matches!(status, GameStatus::Lost);
    CellView {
        revealed: cell.is_revealed() && !cell.is_mine(),
        // a won game shows every mine as flagged
        flagged: cell.is_flagged() || (cell.is_mine() && matches!(status, GameStatus::Won)),
        mine_hit,
        mine_visible,
        neighbor_count: if cell.is_revealed() {
            cell.neighbor_mine_count()
        } else {
            0
        },
    }
}
