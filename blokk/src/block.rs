use crate::Point;

/// A placeable piece shape: an ordered set of cell offsets relative to an
/// anchor cell.
///
/// Blocks are immutable templates. Rotating a block produces a fresh offset
/// list and never mutates the template, so the same inventory entry can be
/// tried in all four orientations during enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    offsets: Vec<Point>,
}

impl Block {
    /// Creates a block from its offset cells. The offsets keep their order,
    /// which makes enumeration and rendering deterministic.
    pub fn new(offsets: Vec<Point>) -> Self {
        debug_assert!(!offsets.is_empty());
        Self { offsets }
    }

    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// Number of cells the block covers.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the offsets rotated by `steps` quarter turns, order preserved.
    pub fn rotated(&self, steps: u8) -> Vec<Point> {
        self.offsets.iter().map(|p| p.rotated(steps)).collect()
    }
}

/// Shorthand for creating a block from a list of `(x, y)` offsets.
///
/// ```
/// # use blokk::{block, Block, Point};
/// assert_eq!(
///     block![(0, 0), (1, 0)],
///     Block::new(vec![Point::new(0, 0), Point::new(1, 0)])
/// );
/// ```
#[macro_export]
macro_rules! block {
    ($(($x:expr, $y:expr)),* $(,)?) => {
        $crate::Block::new(vec![$($crate::Point::new($x, $y)),*])
    };
}
/// The classic 21-piece inventory every player starts with: one monomino,
/// one domino, two triominoes, five tetrominoes and twelve pentominoes.
///
/// Ordering is fixed (ascending size, then an arbitrary but stable order
/// within each size) because moves refer to blocks by inventory index.
pub fn standard_set() -> Vec<Block> {
    vec![
        // 1 cell
        block![(0, 0)],
        // 2 cells
        block![(0, 0), (1, 0)],
        // 3 cells
        block![(0, 0), (1, 0), (2, 0)],
        block![(0, 0), (1, 0), (0, 1)],
        // 4 cells
        block![(0, 0), (1, 0), (2, 0), (3, 0)],
        block![(0, 0), (1, 0), (0, 1), (1, 1)],
        block![(0, 0), (1, 0), (2, 0), (1, 1)],
        block![(1, 0), (2, 0), (0, 1), (1, 1)],
        block![(0, 0), (0, 1), (0, 2), (1, 2)],
        // 5 cells
        block![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
        block![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
        block![(0, 0), (0, 1), (0, 2), (0, 3), (1, 3)],
        block![(1, 0), (1, 1), (0, 2), (1, 2), (0, 3)],
        block![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
        block![(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)],
        block![(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
        block![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
        block![(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)],
        block![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)],
        block![(1, 0), (0, 1), (1, 1), (1, 2), (1, 3)],
        block![(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)],
    ]
}
