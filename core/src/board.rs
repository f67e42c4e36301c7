use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::{Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rejected draws allowed per grid cell before placement switches to picking from the remaining free cells.
const REJECTION_DRAWS_PER_CELL: u32 = 16;

/// Rectangular minefield plus the reveal/flag state of every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Allocates an empty `rows × cols` grid, no mines placed yet.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Self::new(config.rows, config.cols)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// The cell at `coords`, `None` when out of bounds.
    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self.cells[coords.to_nd_index()])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn mines_placed(&self) -> bool {
        self.mine_count > 0
    }

    /// Mines on the board, zero before placement.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Places `mine_count` mines uniformly at random, keeping the 3×3 block around `safe` clear.
    ///
    /// Draws are rejection-sampled. Once the draw budget is spent the remaining mines are picked directly from the
    /// free cells outside the block. Only when every cell outside the block already holds a mine do mines go into the
    /// block itself, and never onto `safe`.
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        mine_count: CellCount,
        safe: Coord2,
        rng: &mut R,
    ) -> Result<()> {
        self.check_mine_count(mine_count)?;
        let safe = self.validate_coords(safe)?;

        let (rows, cols) = self.size();
        let zone_len = NeighborIter::block(safe, (rows, cols)).count() as CellCount;
        let outside_target = mine_count.min(self.total_cells() - zone_len);

        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        let budget = u32::from(self.total_cells()) * REJECTION_DRAWS_PER_CELL;
        while placed < outside_target && draws < budget {
            draws += 1;
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if within_one(safe, coords) || self.cells[coords.to_nd_index()].is_mine {
                continue;
            }
            self.cells[coords.to_nd_index()].is_mine = true;
            placed += 1;
        }

        if placed < outside_target {
            log::debug!(
                "Rejection sampling stopped after {} draws with {}/{} mines placed, picking from free cells",
                draws,
                placed,
                outside_target
            );
            let free: Vec<_> = self
                .iter_coords()
                .filter(|&coords| !within_one(safe, coords))
                .filter(|&coords| !self.cells[coords.to_nd_index()].is_mine)
                .collect();
            placed += self.place_from(free, outside_target - placed, rng);
        }

        if placed < mine_count {
            log::warn!(
                "Only {} cells outside the safe zone around {:?}, placing {} mines inside it",
                self.total_cells() - zone_len,
                safe,
                mine_count - placed
            );
            let free: Vec<_> = NeighborIter::new(safe, (rows, cols)).collect();
            placed += self.place_from(free, mine_count - placed, rng);
        }

        if placed != mine_count {
            log::warn!(
                "Mine placement count mismatch, actual: {}, requested: {}",
                placed,
                mine_count
            );
        }
        self.finish_placement(placed);
        Ok(())
    }

    /// Places mines on exactly the given cells, duplicates count once.
    pub fn place_mines_at(&mut self, mines: &[Coord2]) -> Result<()> {
        if self.mines_placed() {
            return Err(GameError::MinesAlreadyPlaced);
        }
        for &coords in mines {
            self.validate_coords(coords)?;
        }

        let mut mask: Array2<bool> = Array2::default(self.cells.dim());
        for &coords in mines {
            mask[coords.to_nd_index()] = true;
        }
        let count = mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        self.check_mine_count(count)?;

        Zip::from(&mut self.cells)
            .and(&mask)
            .for_each(|cell, &is_mine| cell.is_mine = is_mine);
        self.finish_placement(count);
        Ok(())
    }

    /// Reveals a cell, flood-filling through zero-count regions.
    ///
    /// Out-of-bounds, revealed, and flagged cells are left alone. A mine is marked revealed so it can be shown but
    /// does not count towards the win bound.
    pub fn reveal(&mut self, coords: Coord2) -> RevealResult {
        let Some(cell) = self.cell(coords) else {
            log::debug!("Ignoring reveal outside the board at {:?}", coords);
            return RevealResult::NoChange;
        };
        if !cell.is_openable() {
            return RevealResult::NoChange;
        }
        if cell.is_mine {
            self.cells[coords.to_nd_index()].is_revealed = true;
            return RevealResult::Mine;
        }

        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // queued twice, or a mine bordering a zero region of an unplaced board
            if !cell.is_openable() || cell.is_mine {
                continue;
            }
            cell.is_revealed = true;
            let count = cell.neighbor_mine_count;
            opened += 1;
            log::trace!("Opened {:?}, adjacent mines: {}", visit_coords, count);

            if count == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    cells
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_openable()),
                );
            }
        }

        self.revealed_count += opened;
        RevealResult::Expanded { opened }
    }

    /// Flips the flag on a hidden cell. Revealed and out-of-bounds cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.contains(coords) {
            log::debug!("Ignoring flag outside the board at {:?}", coords);
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Every safe cell is revealed.
    pub fn check_win(&self, mine_count: CellCount) -> bool {
        self.revealed_count == self.total_cells().saturating_sub(mine_count)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
            .count() as u8
    }

    fn check_mine_count(&self, mine_count: CellCount) -> Result<()> {
        if self.mines_placed() {
            return Err(GameError::MinesAlreadyPlaced);
        }
        let max = self.total_cells() - 1;
        if mine_count == 0 || mine_count > max {
            return Err(GameError::InvalidMineCount { max });
        }
        Ok(())
    }

    /// Picks `wanted` cells out of `free` uniformly and turns them into mines.
    fn place_from<R: Rng + ?Sized>(
        &mut self,
        mut free: Vec<Coord2>,
        wanted: CellCount,
        rng: &mut R,
    ) -> CellCount {
        let mut placed = 0;
        while placed < wanted && !free.is_empty() {
            let coords = free.swap_remove(rng.random_range(0..free.len()));
            self.cells[coords.to_nd_index()].is_mine = true;
            placed += 1;
        }
        placed
    }

    fn finish_placement(&mut self, mine_count: CellCount) {
        let counts = Array2::from_shape_fn(self.cells.dim(), |(row, col)| {
            self.adjacent_mine_count((row as Coord, col as Coord))
        });
        Zip::from(&mut self.cells)
            .and(&counts)
            .for_each(|cell, &count| cell.neighbor_mine_count = count);
        self.mine_count = mine_count;
        log::debug!("Placed {} mines on a {:?} board", mine_count, self.size());
    }
}
