use crate::{has_legal_move, Board, IllegalMove, Move};

/// What a validated turn did to the board.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Passed,
    Placed { gained: i32 },
}

/// Validates and applies one turn for the player to move. This is the
/// referee-side entry point: the move comes off the wire and is trusted for
/// nothing.
///
/// `0 0 0 0` doubles as the pass sentinel and as a genuine placement of
/// block 0 at the origin; when that placement is legal it is taken at face
/// value, otherwise the line counts as a pass and is only accepted if the
/// player truly has no legal move.
pub fn execute_turn(board: &mut Board, mv: Move) -> Result<TurnOutcome, IllegalMove> {
    match try_place(board, mv) {
        Ok(outcome) => Ok(outcome),
        Err(_) if mv.is_pass() => {
            if has_legal_move(board) {
                return Err(IllegalMove::PassedWithLegalMoves);
            }
            board.pass_turn();
            Ok(TurnOutcome::Passed)
        }
        Err(err) => Err(err),
    }
}

fn try_place(board: &mut Board, mv: Move) -> Result<TurnOutcome, IllegalMove> {
    let player = board.to_move();
    let inventory = board.inventory(player);
    if mv.block >= inventory.len() {
        return Err(IllegalMove::UnknownBlock { index: mv.block });
    }
    if mv.rotations > 3 {
        return Err(IllegalMove::BadRotation {
            rotations: mv.rotations,
        });
    }
    let offsets = inventory[mv.block].rotated(mv.rotations);
    if !board.can_place(&offsets, mv.anchor(), player) {
        return Err(IllegalMove::RejectedPlacement { mv });
    }
    let placed = board.place(mv);
    let gained = placed.gained();
    placed.commit();
    Ok(TurnOutcome::Placed { gained })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block, Board};

    fn one_block_board() -> Board {
        let inventories = [
            vec![block![(0, 0), (1, 0)]],
            vec![block![(0, 0)]],
            vec![],
            vec![],
        ];
        Board::new(4, vec![], inventories, 0)
    }

    #[test]
    fn a_legal_placement_is_committed() {
        let mut board = one_block_board();
        let outcome = execute_turn(
            &mut board,
            Move {
                block: 0,
                rotations: 0,
                x: 0,
                y: 0,
            },
        );
        assert_eq!(outcome, Ok(TurnOutcome::Placed { gained: 2 }));
        assert_eq!(board.cell(0, 0), 0);
        assert_eq!(board.cell(1, 0), 0);
        assert!(board.inventory(0).is_empty());
        assert_eq!(board.to_move(), 1);
    }

    #[test]
    fn passing_with_moves_left_is_rejected() {
        let inventories = [
            vec![block![(0, 0)], block![(0, 0), (1, 0)]],
            vec![],
            vec![],
            vec![],
        ];
        let mut board = Board::new(4, vec![], inventories, 0);
        execute_turn(
            &mut board,
            Move {
                block: 0,
                rotations: 0,
                x: 0,
                y: 0,
            },
        )
        .unwrap();
        for _ in 0..3 {
            board.pass_turn();
        }
        // Player 0 again. The origin is occupied, so `0 0 0 0` cannot be a
        // placement, and the remaining domino still fits at (1, 1).
        assert_eq!(
            execute_turn(&mut board, Move::PASS),
            Err(IllegalMove::PassedWithLegalMoves)
        );
    }

    #[test]
    fn forced_pass_advances_the_turn() {
        let inventories = [vec![], vec![block![(0, 0)]], vec![], vec![]];
        let mut board = Board::new(4, vec![], inventories, 0);
        assert_eq!(execute_turn(&mut board, Move::PASS), Ok(TurnOutcome::Passed));
        assert_eq!(board.to_move(), 1);
        assert_eq!(board.turn(), 1);
    }

    #[test]
    fn the_pass_sentinel_still_reads_as_a_placement_when_legal() {
        // For player 0, block 0 with no rotation at the origin is a real
        // opening move, so `0 0 0 0` places rather than passes.
        let inventories = [vec![block![(0, 0)]], vec![], vec![], vec![]];
        let mut board = Board::new(4, vec![], inventories, 0);
        assert_eq!(
            execute_turn(&mut board, Move::PASS),
            Ok(TurnOutcome::Placed { gained: 1 })
        );
        assert_eq!(board.cell(0, 0), 0);
    }

    #[test]
    fn bad_indices_are_named() {
        let mut board = one_block_board();
        assert_eq!(
            execute_turn(
                &mut board,
                Move {
                    block: 5,
                    rotations: 0,
                    x: 0,
                    y: 0,
                }
            ),
            Err(IllegalMove::UnknownBlock { index: 5 })
        );
        assert_eq!(
            execute_turn(
                &mut board,
                Move {
                    block: 0,
                    rotations: 6,
                    x: 0,
                    y: 0,
                }
            ),
            Err(IllegalMove::BadRotation { rotations: 6 })
        );
        assert_eq!(
            execute_turn(
                &mut board,
                Move {
                    block: 0,
                    rotations: 0,
                    x: 2,
                    y: 2,
                }
            ),
            Err(IllegalMove::RejectedPlacement {
                mv: Move {
                    block: 0,
                    rotations: 0,
                    x: 2,
                    y: 2,
                }
            })
        );
    }
}
