use std::time::{Duration, Instant};

use blokk::{legal_moves, Board, Jamboree, Move, MoveChooser};
use blokk_bot_utils::Bot;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Number of plies to search before leaf evaluation
    #[arg(short, long, default_value_t = 2)]
    depth: u32,

    /// Fraction of each node's candidates searched with full alpha-beta;
    /// the rest get single-ply evaluations
    #[arg(long, default_value_t = 0.8)]
    prune: f32,

    /// Per-turn time budget in milliseconds; unset means no deadline
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    JamboreeBot {
        number: 0,
        depth: args.depth,
        prune: args.prune,
        time_budget: args.time_budget_ms.map(Duration::from_millis),
    }
    .run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

struct JamboreeBot {
    number: i8,
    depth: u32,
    prune: f32,
    time_budget: Option<Duration>,
}

impl Bot for JamboreeBot {
    fn setup(&mut self, number: i8) {
        self.number = number;
        debug!(number, "assigned player number");
    }

    fn choose(&mut self, board: &mut Board) -> Move {
        let moves = legal_moves(board);
        debug!(
            candidates = moves.len(),
            remaining_blocks = board.inventory(self.number).len(),
            "searching"
        );
        let chooser = Jamboree {
            me: self.number,
            depth: self.depth,
            prune: self.prune,
            deadline: self.time_budget.map(|budget| Instant::now() + budget),
        };
        let mv = chooser.choose(board, moves);
        debug!(%mv, "chose");
        mv
    }
}
