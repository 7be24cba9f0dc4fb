use std::fmt;

use crate::{Board, Point};

/// A candidate or applied placement: which inventory block, how many quarter
/// turns, and the anchor cell the offsets are added to.
///
/// A move is only meaningful relative to the board state and player to move
/// that produced it; inventory indices shift as blocks are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub block: usize,
    pub rotations: u8,
    pub x: i8,
    pub y: i8,
}

impl Move {
    /// The no-op sentinel sent when a player has no legal placement.
    pub const PASS: Move = Move {
        block: 0,
        rotations: 0,
        x: 0,
        y: 0,
    };

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pass(&self) -> bool {
        *self == Move::PASS
    }
}

/// Renders the outbound wire format: four whitespace-separated integers.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.block, self.rotations, self.x, self.y)
    }
}

/// Enumerates every legal placement for the player to move.
///
/// Order is fixed: inventory index ascending, rotation ascending, anchors
/// scanned row-major. The order carries no rules meaning but makes
/// tie-breaking in the search deterministic. Rotations that produce the same
/// offset list as an earlier rotation of the same block (the single-cell
/// block is the common case) are enumerated once.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let player = board.to_move();
    let n = board.dimension();
    let mut moves = Vec::new();
    let mut seen: Vec<Vec<Point>> = Vec::with_capacity(4);

    for (index, block) in board.inventory(player).iter().enumerate() {
        seen.clear();
        for rotations in 0..4u8 {
            let offsets = block.rotated(rotations);
            if seen.contains(&offsets) {
                continue;
            }
            for x in 0..n {
                for y in 0..n {
                    if board.can_place(&offsets, Point::new(x, y), player) {
                        moves.push(Move {
                            block: index,
                            rotations,
                            x,
                            y,
                        });
                    }
                }
            }
            seen.push(offsets);
        }
    }
    moves
}

/// Early-exit variant of [`legal_moves`], used by the referee to decide
/// whether a pass is forced.
pub fn has_legal_move(board: &Board) -> bool {
    let player = board.to_move();
    let n = board.dimension();
    for block in board.inventory(player) {
        for rotations in 0..4u8 {
            let offsets = block.rotated(rotations);
            for x in 0..n {
                for y in 0..n {
                    if board.can_place(&offsets, Point::new(x, y), player) {
                        return true;
                    }
                }
            }
        }
    }
    false
}
