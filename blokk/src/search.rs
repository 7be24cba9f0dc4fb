use std::time::Instant;

use crate::{estimate, legal_moves, Board, Move};

/// Sentinel magnitude for a decided game; the initial alpha/beta window is
/// ten times wider so a win score can never collide with the bounds.
pub const WIN_VALUE: i32 = 1_000_000;
const INITIAL_BOUND: i32 = WIN_VALUE * 10;

/// A move paired with the value the search assigned to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub mv: Move,
    pub value: i32,
}

/// Strategy interface for picking one move out of the legal candidates.
///
/// Implementations are selected once at bot startup; there is no runtime
/// strategy loading and no process-wide mutable state. The board is borrowed
/// mutably because searching strategies apply and undo candidate moves in
/// place, but every implementation leaves the board exactly as it found it.
///
/// `choose` must return [`Move::PASS`] when `moves` is empty; a turn without
/// candidates is an ordinary outcome, never an error.
pub trait MoveChooser {
    fn choose(&self, board: &mut Board, moves: Vec<Move>) -> Move;
}

/// Greedy single-ply chooser: shortlist every candidate whose placement
/// score comes within `tolerance` of the best, then prefer the shortlisted
/// move that reaches farthest into the open board, measured as the largest
/// coordinate product among covered cells. Ties go to the latest-found
/// candidate.
#[derive(Clone, Copy, Debug)]
pub struct Spatial {
    pub tolerance: i32,
}

impl Default for Spatial {
    fn default() -> Self {
        Self { tolerance: 3 }
    }
}

impl MoveChooser for Spatial {
    fn choose(&self, board: &mut Board, moves: Vec<Move>) -> Move {
        if moves.is_empty() {
            return Move::PASS;
        }
        let scores: Vec<i32> = moves.iter().map(|&mv| score_of(board, mv)).collect();
        let best_score = *scores.iter().max().expect("nonempty candidate list");

        let mut best = Move::PASS;
        let mut best_reach = -1;
        for (&mv, &score) in moves.iter().zip(&scores) {
            if score + self.tolerance < best_score {
                continue;
            }
            let reach = reach_of(board, mv);
            if best_reach <= reach {
                best_reach = reach;
                best = mv;
            }
        }
        best
    }
}

/// Depth-limited adversarial search: the configured player maximizes, all
/// three rivals uniformly minimize.
///
/// At every node the candidate list is split at the `prune` fraction. The
/// prefix is searched with full alpha-beta recursion, cutting off as soon as
/// the window closes; the remainder contributes single-ply static
/// evaluations with no recursion. The best edge across both groups wins.
/// These pruning semantics are deliberate: the skimmed tail trades depth for
/// breadth at a fixed cost instead of inheriting a half-converged window.
#[derive(Clone, Copy, Debug)]
pub struct Jamboree {
    /// The engine's own player id; decides who maximizes at each node.
    pub me: i8,
    /// Plies to search before leaf evaluation.
    pub depth: u32,
    /// Fraction of each node's candidates searched with full alpha-beta.
    pub prune: f32,
    /// When set, node expansion stops past this point and the best result
    /// found so far unwinds to the root.
    pub deadline: Option<Instant>,
}

impl Jamboree {
    pub fn new(me: i8, depth: u32) -> Self {
        Self {
            me,
            depth,
            prune: 0.8,
            deadline: None,
        }
    }
}

impl MoveChooser for Jamboree {
    fn choose(&self, board: &mut Board, moves: Vec<Move>) -> Move {
        if moves.is_empty() {
            return Move::PASS;
        }
        self.node(board, moves, self.depth, -INITIAL_BOUND, INITIAL_BOUND)
            .mv
    }
}

impl Jamboree {
    fn node(
        &self,
        board: &mut Board,
        moves: Vec<Move>,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Edge {
        debug_assert!(!moves.is_empty());
        let maximizing = board.to_move() == self.me;
        let cut = ((moves.len() as f32) * self.prune) as usize;
        let (searched, skimmed) = moves.split_at(cut.min(moves.len()));

        let mut best: Option<Edge> = None;
        for &mv in searched {
            let value = self.subtree_value(board, mv, depth, alpha, beta);
            take_better(&mut best, Edge { mv, value }, maximizing);
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
            if self.out_of_time() {
                break;
            }
        }
        for &mv in skimmed {
            if best.is_some() && self.out_of_time() {
                break;
            }
            let value = {
                let placed = board.place(mv);
                estimate(&placed, self.me)
            };
            take_better(&mut best, Edge { mv, value }, maximizing);
        }
        best.expect("nonempty candidate list yields an edge")
    }

    fn subtree_value(&self, board: &mut Board, mv: Move, depth: u32, alpha: i32, beta: i32) -> i32 {
        let mut placed = board.place(mv);
        if depth <= 1 {
            return estimate(&placed, self.me);
        }
        let moves = legal_moves(&placed);
        if moves.is_empty() {
            // The mover below has no answer; the synthesized no-op is worth 0.
            return 0;
        }
        self.node(&mut placed, moves, depth - 1, alpha, beta).value
    }

    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

fn take_better(best: &mut Option<Edge>, candidate: Edge, maximizing: bool) {
    let replace = match best {
        None => true,
        Some(current) => {
            if maximizing {
                candidate.value > current.value
            } else {
                candidate.value < current.value
            }
        }
    };
    if replace {
        *best = Some(candidate);
    }
}

fn score_of(board: &Board, mv: Move) -> i32 {
    let offsets = board.inventory(board.to_move())[mv.block].rotated(mv.rotations);
    board.placement_score(&offsets, mv.anchor())
}

/// Largest `x * y` product among the cells the move covers; a cheap proxy
/// for expansion toward the open part of the board.
fn reach_of(board: &Board, mv: Move) -> i32 {
    let offsets = board.inventory(board.to_move())[mv.block].rotated(mv.rotations);
    offsets
        .iter()
        .map(|&offset| {
            let p = mv.anchor() + offset;
            i32::from(p.x) * i32::from(p.y)
        })
        .max()
        .expect("blocks cover at least one cell")
}
