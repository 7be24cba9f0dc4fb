use crate::{legal_moves, standard_set, Block, Board};

/// A block drawn from the standard inventory.
#[derive(Clone, Debug)]
pub struct AnyBlock(pub Block);

impl quickcheck::Arbitrary for AnyBlock {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let set = standard_set();
        let index = usize::arbitrary(g) % set.len();
        AnyBlock(set[index].clone())
    }
}

/// A board reached by playing a random sequence of legal moves from a fresh
/// position, so that every generated grid satisfies the placement rules.
///
/// Kept deliberately small (dimension 6..10, six-block inventories, at most
/// a dozen turns) so property tests stay fast.
#[derive(Clone, Debug)]
pub struct ReachableBoard(pub Board);

impl quickcheck::Arbitrary for ReachableBoard {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let dimension = 6 + (i8::arbitrary(g).rem_euclid(4));
        let blocks: Vec<Block> = standard_set().into_iter().take(6).collect();
        let inventories = [
            blocks.clone(),
            blocks.clone(),
            blocks.clone(),
            blocks,
        ];
        let mut board = Board::new(dimension, vec![], inventories, 0);

        let turns = usize::arbitrary(g) % 12;
        let mut stuck_players = 0;
        for _ in 0..turns {
            if stuck_players == 4 {
                break;
            }
            let moves = legal_moves(&board);
            if moves.is_empty() {
                board.pass_turn();
                stuck_players += 1;
                continue;
            }
            stuck_players = 0;
            let mv = moves[usize::arbitrary(g) % moves.len()];
            board.place(mv).commit();
        }
        ReachableBoard(board)
    }
}
