use blokk::{legal_moves, Board, Move, MoveChooser, Spatial};
use blokk_bot_utils::Bot;
use clap::Parser;

#[derive(Parser)]
struct Args {
    /// Keep candidates whose placement score comes within this margin of
    /// the best before the spatial tiebreak
    #[arg(short, long, default_value_t = 3)]
    tolerance: i32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    SpatialBot {
        chooser: Spatial {
            tolerance: args.tolerance,
        },
    }
    .run()
}

struct SpatialBot {
    chooser: Spatial,
}

impl Bot for SpatialBot {
    fn setup(&mut self, _number: i8) {}

    fn choose(&mut self, board: &mut Board) -> Move {
        let moves = legal_moves(board);
        self.chooser.choose(board, moves)
    }
}
