use std::path::PathBuf;

use clap::Parser;
use judge::{play_game, GameResult, GameSetup, Player, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Paths to the four bot executables, in player order
    #[clap(num_args(4..=4), value_delimiter = ' ')]
    bots: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// Board dimension
    #[arg(short, long, default_value_t = 20)]
    dimension: i8,

    /// Number of bonus squares to scatter over the grid
    #[arg(short, long, default_value_t = 8)]
    bonus_squares: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop as soon as one bot plays an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the games' wire exchanges as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    wins: [usize; 4],
    illegal_moves: [usize; 4],
    ties: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let players: Vec<Player> = args
        .bots
        .iter()
        .map(|path| Player::spawn(path))
        .collect::<anyhow::Result<_>>()?;
    let mut players: [Player; 4] = players
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected exactly four bot executables"))?;

    let setup = GameSetup {
        dimension: args.dimension,
        num_bonus_squares: args.bonus_squares,
    };

    let mut tally = Tally::default();
    for game_idx in 0..args.num_games {
        match play_game(&mut rng, &mut players, &setup, &mut recorder)? {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = players[player_idx].name.as_str(), game_idx);
                tally.wins[player_idx] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                tally.ties += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = players[player_idx].name.as_str(),
                    game_idx, "Illegal move by player"
                );
                info!("{}", err);
                tally.illegal_moves[player_idx] += 1;
                if args.stop_on_illegal_move {
                    break;
                }
            }
        }
    }

    eprintln!("End result:");
    for (player_idx, player) in players.iter().enumerate() {
        let paren = if tally.illegal_moves[player_idx] > 0 {
            format!(
                " ({} games ended by their illegal moves)",
                tally.illegal_moves[player_idx]
            )
        } else {
            String::new()
        };
        eprintln!("- {} wins by {}{}", tally.wins[player_idx], player.name, paren);
    }
    eprintln!("- {} ties", tally.ties);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
