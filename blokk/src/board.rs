use std::ops::{Deref, DerefMut};

use crate::{Block, BlockMsg, BoardMsg, Move, Point, SnapshotError};

/// Cell marker for an unowned grid cell.
pub const EMPTY: i8 = -1;

pub const NUM_PLAYERS: i8 = 4;

/// The shared playing grid plus everything that changes as the game goes on:
/// per-player inventories of unplaced blocks, the player to move and a turn
/// counter.
///
/// A board is created once per game (or once per state snapshot received
/// over the wire) and mutated in place afterwards. Search code mutates it
/// speculatively through [`Board::place`], whose guard undoes the placement
/// when dropped, so a search frame can never leave the board in a
/// half-applied state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimension: i8,
    /// Row-major cell ownership, indexed `x * dimension + y`.
    /// Either [`EMPTY`] or an owning player id in `0..4`.
    grid: Vec<i8>,
    bonus_squares: Vec<Point>,
    inventories: [Vec<Block>; 4],
    to_move: i8,
    turn: u32,
    /// Per-player covered-cell totals, weighted so that a cell on a bonus
    /// square counts three times. Kept in sync by place/undo.
    placed: [i32; 4],
}

impl Board {
    /// Creates a fresh board with the given inventories. Panics if the
    /// dimension or player id is out of range; boards built from untrusted
    /// input go through [`Board::from_snapshot`] instead.
    pub fn new(
        dimension: i8,
        bonus_squares: Vec<Point>,
        inventories: [Vec<Block>; 4],
        to_move: i8,
    ) -> Self {
        assert!(dimension > 0);
        assert!((0..NUM_PLAYERS).contains(&to_move));
        let cells = dimension as usize * dimension as usize;
        Self {
            dimension,
            grid: vec![EMPTY; cells],
            bonus_squares,
            inventories,
            to_move,
            turn: 0,
            placed: [0; 4],
        }
    }

    /// Builds a board from an inbound state record. This is the only
    /// fallible constructor; every field of the record is validated here so
    /// the rest of the crate can assume a well-formed board.
    pub fn from_snapshot(
        snapshot: &BoardMsg,
        blocks: &[Vec<BlockMsg>],
        to_move: i8,
    ) -> Result<Self, SnapshotError> {
        let dimension = snapshot.dimension;
        if dimension <= 0 {
            return Err(SnapshotError::BadDimension { dimension });
        }
        let n = dimension as usize;
        if snapshot.grid.len() != n {
            return Err(SnapshotError::GridShapeMismatch {
                expected: n,
                actual: snapshot.grid.len(),
            });
        }
        if !(0..NUM_PLAYERS).contains(&to_move) {
            return Err(SnapshotError::BadPlayerToMove { player: to_move });
        }
        if blocks.len() != NUM_PLAYERS as usize {
            return Err(SnapshotError::BadPlayerCount {
                actual: blocks.len(),
            });
        }

        let mut grid = Vec::with_capacity(n * n);
        for (x, column) in snapshot.grid.iter().enumerate() {
            if column.len() != n {
                return Err(SnapshotError::GridShapeMismatch {
                    expected: n,
                    actual: column.len(),
                });
            }
            for (y, &value) in column.iter().enumerate() {
                if value != EMPTY && !(0..NUM_PLAYERS).contains(&value) {
                    return Err(SnapshotError::BadCell {
                        x: x as i8,
                        y: y as i8,
                        value,
                    });
                }
                grid.push(value);
            }
        }

        let mut bonus_squares = Vec::with_capacity(snapshot.bonus_squares.len());
        for &[x, y] in &snapshot.bonus_squares {
            if x < 0 || x >= dimension || y < 0 || y >= dimension {
                return Err(SnapshotError::BadBonusSquare { x, y });
            }
            bonus_squares.push(Point::new(x, y));
        }

        let mut inventories: [Vec<Block>; 4] = Default::default();
        for (player, inventory) in blocks.iter().enumerate() {
            for (index, offsets) in inventory.iter().enumerate() {
                if offsets.is_empty() {
                    return Err(SnapshotError::EmptyBlock { player, index });
                }
                inventories[player]
                    .push(Block::new(offsets.iter().map(|&o| o.into()).collect()));
            }
        }

        let mut board = Self {
            dimension,
            grid,
            bonus_squares,
            inventories,
            to_move,
            turn: 0,
            placed: [0; 4],
        };
        for x in 0..dimension {
            for y in 0..dimension {
                let owner = board.cell(x, y);
                if owner != EMPTY {
                    let weight = board.cell_weight(Point::new(x, y));
                    board.placed[owner as usize] += weight;
                }
            }
        }
        Ok(board)
    }

    /// Serializes the grid back into the wire shape, the inverse of
    /// [`Board::from_snapshot`].
    pub fn to_snapshot(&self) -> BoardMsg {
        let n = self.dimension;
        BoardMsg {
            dimension: n,
            grid: (0..n)
                .map(|x| (0..n).map(|y| self.cell(x, y)).collect())
                .collect(),
            bonus_squares: self.bonus_squares.iter().map(|p| [p.x, p.y]).collect(),
        }
    }

    pub fn blocks_msg(&self) -> Vec<Vec<BlockMsg>> {
        self.inventories
            .iter()
            .map(|inventory| {
                inventory
                    .iter()
                    .map(|b| b.offsets().iter().map(|&p| p.into()).collect())
                    .collect()
            })
            .collect()
    }

    pub fn dimension(&self) -> i8 {
        self.dimension
    }

    pub fn to_move(&self) -> i8 {
        self.to_move
    }

    /// Number of moves applied since this board was constructed.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn bonus_squares(&self) -> &[Point] {
        &self.bonus_squares
    }

    pub fn inventory(&self, player: i8) -> &[Block] {
        &self.inventories[player as usize]
    }

    /// Weighted covered-cell total for `player`; the judge's final score and
    /// the raw material of the static evaluation.
    pub fn placed_score(&self, player: i8) -> i32 {
        self.placed[player as usize]
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && x < self.dimension && y >= 0 && y < self.dimension
    }

    /// Owner of the cell, or [`EMPTY`]. Callers bound-check before indexing.
    pub fn cell(&self, x: i8, y: i8) -> i8 {
        debug_assert!(self.in_bounds(x, y));
        self.grid[x as usize * self.dimension as usize + y as usize]
    }

    fn set_cell(&mut self, x: i8, y: i8, value: i8) {
        debug_assert!(self.in_bounds(x, y));
        self.grid[x as usize * self.dimension as usize + y as usize] = value;
    }

    pub fn is_bonus(&self, p: Point) -> bool {
        self.bonus_squares.contains(&p)
    }

    fn cell_weight(&self, p: Point) -> i32 {
        if self.is_bonus(p) {
            3
        } else {
            1
        }
    }

    /// The starting corner assigned to `player`: top-left, top-right,
    /// bottom-right, bottom-left for ids 0 through 3.
    pub fn corner_of(&self, player: i8) -> Point {
        let n = self.dimension - 1;
        match player {
            0 => Point::new(0, 0),
            1 => Point::new(n, 0),
            2 => Point::new(n, n),
            3 => Point::new(0, n),
            _ => panic!("invalid player id {player}"),
        }
    }

    /// Whether `player` may put a block with the given rotated offsets down
    /// at `anchor`.
    ///
    /// Per offset, in short-circuit order: the absolute cell must be in
    /// bounds, empty, and not edge-adjacent to any cell already owned by
    /// `player` (own pieces may only ever touch corner-to-corner). On top of
    /// that the placement as a whole must either cover the player's starting
    /// corner (mandatory while that corner cell is still empty, i.e. for the
    /// first placement) or touch an own cell diagonally.
    ///
    /// A `false` result is an ordinary outcome, not an error.
    pub fn can_place(&self, offsets: &[Point], anchor: Point, player: i8) -> bool {
        let corner = self.corner_of(player);
        let mut on_corner = false;
        let mut diagonal_contact = false;

        for &offset in offsets {
            let p = anchor + offset;
            let (x, y) = (p.x, p.y);
            if !self.in_bounds(x, y) {
                return false;
            }
            if self.cell(x, y) != EMPTY {
                return false;
            }
            if (x > 0 && self.cell(x - 1, y) == player)
                || (y > 0 && self.cell(x, y - 1) == player)
                || (x + 1 < self.dimension && self.cell(x + 1, y) == player)
                || (y + 1 < self.dimension && self.cell(x, y + 1) == player)
            {
                return false;
            }

            on_corner = on_corner || p == corner;
            diagonal_contact = diagonal_contact
                || (x > 0 && y > 0 && self.cell(x - 1, y - 1) == player)
                || (x > 0 && y + 1 < self.dimension && self.cell(x - 1, y + 1) == player)
                || (x + 1 < self.dimension && y > 0 && self.cell(x + 1, y - 1) == player)
                || (x + 1 < self.dimension
                    && y + 1 < self.dimension
                    && self.cell(x + 1, y + 1) == player);
        }

        if self.cell(corner.x, corner.y) == EMPTY && !on_corner {
            return false;
        }
        if !on_corner && !diagonal_contact {
            return false;
        }
        true
    }

    /// Heuristic value of putting the given rotated offsets down at
    /// `anchor`: the covered cell count, tripled when the placement hits a
    /// bonus square. Distinct from the whole-board evaluation in `eval`.
    pub fn placement_score(&self, offsets: &[Point], anchor: Point) -> i32 {
        let mut multiplier = 1;
        for &offset in offsets {
            if self.is_bonus(anchor + offset) {
                multiplier = 3;
            }
        }
        multiplier * offsets.len() as i32
    }

    /// Applies `mv` for the player to move and returns a guard that undoes
    /// the placement when dropped. Call [`PlacedMove::commit`] to make the
    /// move permanent.
    ///
    /// `mv` must be legal for the current position (enumerated by
    /// `legal_moves` or validated by `execute_turn`); applying an illegal
    /// move is a contract violation.
    pub fn place(&mut self, mv: Move) -> PlacedMove<'_> {
        let player = self.to_move;
        debug_assert!(mv.block < self.inventories[player as usize].len());
        let block = self.inventories[player as usize].remove(mv.block);

        let anchor = mv.anchor();
        let cells: Vec<Point> = block.rotated(mv.rotations).iter().map(|&o| anchor + o).collect();
        debug_assert!({
            let offsets = block.rotated(mv.rotations);
            self.can_place(&offsets, anchor, player)
        });

        let mut gained = 0;
        for &cell in &cells {
            gained += self.cell_weight(cell);
            self.set_cell(cell.x, cell.y, player);
        }
        self.placed[player as usize] += gained;
        self.turn += 1;
        self.to_move = (player + 1) % NUM_PLAYERS;

        PlacedMove {
            board: self,
            player,
            block_index: mv.block,
            block: Some(block),
            cells,
            gained,
            committed: false,
        }
    }

    /// Advances the turn without placing anything. Used by the referee when
    /// a player has no legal move left; the game goes on for the others.
    pub fn pass_turn(&mut self) {
        self.turn += 1;
        self.to_move = (self.to_move + 1) % NUM_PLAYERS;
    }
}

/// Scoped application of a single move.
///
/// Dropping the guard restores the board byte-for-byte: cells are cleared,
/// the block returns to its original inventory slot, and the turn counter
/// and player to move roll back. This holds on every exit path, including
/// early returns and pruning cutoffs inside the search, which is what makes
/// undo-based backtracking safe without copying the grid per node.
pub struct PlacedMove<'a> {
    board: &'a mut Board,
    player: i8,
    block_index: usize,
    block: Option<Block>,
    cells: Vec<Point>,
    gained: i32,
    committed: bool,
}

impl PlacedMove<'_> {
    /// Score gained by this placement (weighted covered cells).
    pub fn gained(&self) -> i32 {
        self.gained
    }

    /// Makes the placement permanent: the guard no longer undoes on drop.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for PlacedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for &cell in &self.cells {
            self.board.set_cell(cell.x, cell.y, EMPTY);
        }
        self.board.placed[self.player as usize] -= self.gained;
        self.board.turn -= 1;
        self.board.to_move = self.player;
        self.board.inventories[self.player as usize]
            .insert(self.block_index, self.block.take().expect("block already restored"));
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableBoard;
    use crate::{block, legal_moves, standard_set};

    fn small_board() -> Board {
        let inventories = [
            vec![block![(0, 0)], block![(0, 0), (1, 0)]],
            vec![block![(0, 0)]],
            vec![block![(0, 0)]],
            vec![block![(0, 0)]],
        ];
        Board::new(5, vec![], inventories, 0)
    }

    #[test]
    fn first_placement_must_cover_the_corner() {
        let board = small_board();
        let offsets = [Point::new(0, 0)];
        assert!(board.can_place(&offsets, Point::new(0, 0), 0));
        assert!(!board.can_place(&offsets, Point::new(2, 2), 0));
        // Player 2 starts from the opposite corner.
        assert!(board.can_place(&offsets, Point::new(4, 4), 2));
        assert!(!board.can_place(&offsets, Point::new(0, 0), 2));
    }

    #[test]
    fn own_pieces_may_only_touch_diagonally() {
        let mut board = small_board();
        board
            .place(Move {
                block: 0,
                rotations: 0,
                x: 0,
                y: 0,
            })
            .commit();
        // Back to player 0 for the next try.
        for _ in 0..3 {
            board.pass_turn();
        }

        let domino = board.inventory(0)[0].rotated(0);
        // Edge contact with the piece at (0, 0).
        assert!(!board.can_place(&domino, Point::new(1, 0), 0));
        assert!(!board.can_place(&domino, Point::new(0, 1), 0));
        // Diagonal contact is what the rules ask for.
        assert!(board.can_place(&domino, Point::new(1, 1), 0));
        // No contact at all.
        assert!(!board.can_place(&domino, Point::new(3, 3), 0));
    }

    #[test]
    fn occupied_and_out_of_bounds_cells_reject() {
        let mut board = small_board();
        board
            .place(Move {
                block: 0,
                rotations: 0,
                x: 0,
                y: 0,
            })
            .commit();
        let single = [Point::new(0, 0)];
        assert!(!board.can_place(&single, Point::new(0, 0), 1));
        assert!(!board.can_place(&single, Point::new(5, 0), 1));
        assert!(!board.can_place(&single, Point::new(-1, 4), 1));
    }

    #[test]
    fn placement_score_triples_on_bonus() {
        let inventories = [vec![], vec![], vec![], vec![]];
        let board = Board::new(5, vec![Point::new(1, 1)], inventories, 0);
        let domino = [Point::new(0, 0), Point::new(1, 0)];
        assert_eq!(board.placement_score(&domino, Point::new(2, 2)), 2);
        assert_eq!(board.placement_score(&domino, Point::new(0, 1)), 6);
        assert_eq!(board.placement_score(&domino, Point::new(1, 1)), 6);
    }

    #[test]
    fn commit_is_permanent() {
        let mut board = small_board();
        let mv = Move {
            block: 0,
            rotations: 0,
            x: 0,
            y: 0,
        };
        board.place(mv).commit();
        assert_eq!(board.cell(0, 0), 0);
        assert_eq!(board.inventory(0).len(), 1);
        assert_eq!(board.to_move(), 1);
        assert_eq!(board.turn(), 1);
        assert_eq!(board.placed_score(0), 1);
    }

    #[test]
    fn dropping_the_guard_restores_everything() {
        let mut board = small_board();
        let before = board.clone();
        {
            let placed = board.place(Move {
                block: 1,
                rotations: 0,
                x: 0,
                y: 0,
            });
            assert_eq!(placed.cell(0, 0), 0);
            assert_eq!(placed.cell(1, 0), 0);
            assert_eq!(placed.to_move(), 1);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn snapshot_roundtrip() {
        let inventories = [standard_set(), standard_set(), standard_set(), standard_set()];
        let mut board = Board::new(7, vec![Point::new(3, 3)], inventories, 0);
        board
            .place(Move {
                block: 3,
                rotations: 1,
                x: 1,
                y: 0,
            })
            .commit();

        let snapshot = board.to_snapshot();
        let blocks = board.blocks_msg();
        let restored = Board::from_snapshot(&snapshot, &blocks, board.to_move()).unwrap();
        assert_eq!(restored.dimension(), board.dimension());
        assert_eq!(restored.to_move(), board.to_move());
        for x in 0..7 {
            for y in 0..7 {
                assert_eq!(restored.cell(x, y), board.cell(x, y));
            }
        }
        for player in 0..NUM_PLAYERS {
            assert_eq!(restored.inventory(player), board.inventory(player));
            assert_eq!(restored.placed_score(player), board.placed_score(player));
        }
    }

    #[test]
    fn snapshot_validation() {
        let snapshot = BoardMsg {
            dimension: 2,
            grid: vec![vec![EMPTY, EMPTY], vec![EMPTY, 4]],
            bonus_squares: vec![],
        };
        let blocks = vec![vec![], vec![], vec![], vec![]];
        assert_eq!(
            Board::from_snapshot(&snapshot, &blocks, 0),
            Err(SnapshotError::BadCell { x: 1, y: 1, value: 4 })
        );

        let snapshot = BoardMsg {
            dimension: 2,
            grid: vec![vec![EMPTY, EMPTY]],
            bonus_squares: vec![],
        };
        assert_eq!(
            Board::from_snapshot(&snapshot, &blocks, 0),
            Err(SnapshotError::GridShapeMismatch { expected: 2, actual: 1 })
        );

        let snapshot = BoardMsg {
            dimension: 2,
            grid: vec![vec![EMPTY, EMPTY], vec![EMPTY, EMPTY]],
            bonus_squares: vec![[2, 0]],
        };
        assert_eq!(
            Board::from_snapshot(&snapshot, &blocks, 0),
            Err(SnapshotError::BadBonusSquare { x: 2, y: 0 })
        );
        assert_eq!(
            Board::from_snapshot(
                &BoardMsg {
                    dimension: 2,
                    grid: vec![vec![EMPTY, EMPTY], vec![EMPTY, EMPTY]],
                    bonus_squares: vec![],
                },
                &blocks,
                4
            ),
            Err(SnapshotError::BadPlayerToMove { player: 4 })
        );
    }

    quickcheck! {
        fn place_then_drop_is_identity(input: ReachableBoard, selector: usize) -> bool {
            let ReachableBoard(mut board) = input;
            let moves = legal_moves(&board);
            if moves.is_empty() {
                return true;
            }
            let mv = moves[selector % moves.len()];
            let before = board.clone();
            {
                let _placed = board.place(mv);
            }
            board == before
        }

        fn no_two_own_cells_share_an_edge(input: ReachableBoard) -> bool {
            let ReachableBoard(board) = input;
            let n = board.dimension();
            for x in 0..n {
                for y in 0..n {
                    let owner = board.cell(x, y);
                    if owner == EMPTY {
                        continue;
                    }
                    if x + 1 < n && board.cell(x + 1, y) == owner {
                        return false;
                    }
                    if y + 1 < n && board.cell(x, y + 1) == owner {
                        return false;
                    }
                }
            }
            true
        }
    }
}
