use blokk::{legal_moves, Board, Move};
use blokk_bot_utils::Bot;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn setup(&mut self, _number: i8) {}

    fn choose(&mut self, board: &mut Board) -> Move {
        let moves = legal_moves(board);
        moves.choose(&mut self.rng).copied().unwrap_or(Move::PASS)
    }
}
