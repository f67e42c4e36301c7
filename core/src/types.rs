use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `a` and `b` are within Chebyshev distance 1 of each other (the 3×3 block around `a`).
pub const fn within_one(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // boards never exceed `Coord::MAX` on either axis
        let bounds = (rows as Coord, cols as Coord);
        NeighborIter::new(center, bounds)
    }
}

/// Row/column offsets of the 3×3 block, row-major, center included at index 4.
const BLOCK: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const CENTER: usize = 4;

fn offset(center: Coord2, (dr, dc): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(dr)?;
    let col = center.1.checked_add_signed(dc)?;
    (row < rows && col < cols).then_some((row, col))
}

/// Iterates the in-bounds cells of the 3×3 block around `center`.
///
/// Out-of-grid positions are skipped, so an edge cell yields 5 neighbors and a corner 3.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: usize,
    with_center: bool,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
            with_center: false,
        }
    }

    /// Same block, but also yields `center` itself when it is in bounds.
    pub fn block(center: Coord2, bounds: Coord2) -> Self {
        Self {
            with_center: true,
            ..Self::new(center, bounds)
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = BLOCK.get(self.next) {
            let index = self.next;
            self.next += 1;

            if index == CENTER && !self.with_center {
                continue;
            }
            if let Some(coords) = offset(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}
