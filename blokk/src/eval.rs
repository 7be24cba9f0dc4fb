use crate::{Board, NUM_PLAYERS};

/// Static whole-board score from `player`'s perspective: own weighted
/// covered-cell total minus the best rival total. All three rivals count as
/// one uniform opposition; there is no per-opponent modeling.
///
/// The perspective is fixed to the engine's configured player for the whole
/// search, regardless of whose turn it is at the leaf being evaluated. Pure
/// and O(1): the board maintains the totals incrementally.
pub fn estimate(board: &Board, player: i8) -> i32 {
    let own = board.placed_score(player);
    let best_rival = (0..NUM_PLAYERS)
        .filter(|&p| p != player)
        .map(|p| board.placed_score(p))
        .max()
        .unwrap_or(0);
    own - best_rival
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block, Board, Move};

    #[test]
    fn estimate_tracks_the_strongest_rival() {
        let inventories = [
            vec![block![(0, 0), (1, 0), (0, 1)]],
            vec![block![(0, 0)]],
            vec![block![(0, 0), (1, 0)]],
            vec![],
        ];
        let mut board = Board::new(5, vec![], inventories, 0);
        board
            .place(Move {
                block: 0,
                rotations: 0,
                x: 0,
                y: 0,
            })
            .commit();
        board
            .place(Move {
                block: 0,
                rotations: 0,
                x: 4,
                y: 0,
            })
            .commit();
        board
            .place(Move {
                block: 0,
                rotations: 0,
                x: 3,
                y: 4,
            })
            .commit();

        // Totals: player 0 has 3 cells, player 1 has 1, player 2 has 2.
        assert_eq!(estimate(&board, 0), 3 - 2);
        assert_eq!(estimate(&board, 1), 1 - 3);
        assert_eq!(estimate(&board, 2), 2 - 3);
        assert_eq!(estimate(&board, 3), 0 - 3);
    }
}
