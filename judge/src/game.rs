use std::collections::BTreeSet;

use blokk::{
    execute_turn, render_grid, standard_set, Board, IllegalMove, Point, StateMsg, TurnOutcome,
    NUM_PLAYERS,
};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::player::Player;
use crate::recording::Recorder;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

pub struct GameSetup {
    pub dimension: i8,
    pub num_bonus_squares: usize,
}

/// Plays one full game between the four bots. Returns an error only on
/// communication failure, not when an illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player; 4],
    setup: &GameSetup,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let bonus_squares = roll_bonus_squares(rng, setup);
    let inventories = [
        standard_set(),
        standard_set(),
        standard_set(),
        standard_set(),
    ];
    let mut board = Board::new(setup.dimension, bonus_squares, inventories, 0);

    // Tell every bot which corner it plays from.
    for (number, player) in players.iter_mut().enumerate() {
        player.send(recorder, &StateMsg::setup(number as i8))?;
    }

    // The game ends once all four players pass in a row; a single stuck
    // player does not stop the others from placing.
    let mut consecutive_passes = 0;
    while consecutive_passes < 4 {
        let player_idx = board.to_move() as usize;
        let msg = StateMsg::turn_request(&board);
        let mv = players[player_idx].request_move(recorder, &msg)?;
        match execute_turn(&mut board, mv) {
            Ok(TurnOutcome::Placed { gained }) => {
                consecutive_passes = 0;
                debug!(player = players[player_idx].name.as_str(), %mv, gained, "placed");
            }
            Ok(TurnOutcome::Passed) => {
                consecutive_passes += 1;
                debug!(player = players[player_idx].name.as_str(), "passed");
            }
            Err(err) => {
                return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
            }
        }
    }

    debug!("final position:\n{}", render_grid(&board));

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    // Report who covered the most, bonus-weighted.
    let scores: Vec<i32> = (0..NUM_PLAYERS).map(|p| board.placed_score(p)).collect();
    debug!(?scores, "game over");
    let best = *scores.iter().max().expect("four scores");
    let winners: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == best)
        .map(|(player_idx, _)| player_idx)
        .collect();
    Ok(if let [player_idx] = winners[..] {
        GameResult::WonByPlayer { player_idx }
    } else {
        GameResult::Tie
    })
}

/// Scatters bonus squares over the grid, sparing the four starting corners.
fn roll_bonus_squares(rng: &mut StdRng, setup: &GameSetup) -> Vec<Point> {
    let n = setup.dimension;
    let corners = [
        Point::new(0, 0),
        Point::new(n - 1, 0),
        Point::new(n - 1, n - 1),
        Point::new(0, n - 1),
    ];
    let available = (n as usize * n as usize).saturating_sub(corners.len());
    let mut squares = BTreeSet::new();
    while squares.len() < setup.num_bonus_squares.min(available) {
        let p = Point::new(rng.gen_range(0..n), rng.gen_range(0..n));
        if !corners.contains(&p) {
            squares.insert(p);
        }
    }
    squares.into_iter().collect()
}
