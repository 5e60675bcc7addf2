//! Command-line front end for the move engine
//!
//! Without `--request` it plays a short engine-vs-engine game and prints the
//! board. With `--request` it reads one JSON move request from stdin and
//! prints the JSON response.

use std::io::{self, Read};

use clap::Parser;
use log::LevelFilter;

use gomoku::worker::{MoveRequest, SearchWorker};
use gomoku::{Engine, EngineConfig, EngineError, GameSession, Stone};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Threat-space search ply limit
    #[arg(long, default_value_t = 6)]
    ply: u8,

    /// Threat-space search budget per move
    #[arg(long, default_value_t = 500)]
    time_limit_ms: u64,

    /// Never answer from the opening book
    #[arg(long)]
    no_book: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Read a JSON move request from stdin and answer it
    #[arg(long)]
    request: bool,
}

impl Args {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            max_ply: self.ply,
            time_limit_ms: self.time_limit_ms,
            use_opening_book: !self.no_book,
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

/// Answer one request from stdin. Flags only tighten what the request asks
/// for: `--no-book` turns the book off.
fn answer_request(args: &Args) -> Result<(), EngineError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut request: MoveRequest = serde_json::from_str(&input)?;
    if args.no_book {
        request.use_opening_book = false;
    }

    let response = SearchWorker::spawn(request)?.wait()?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Engine plays the attacker through a worker, a second engine plays the
/// defender on this thread.
fn self_play(config: EngineConfig) -> Result<(), EngineError> {
    let mut session = GameSession::new(config, Stone::Attacker, Stone::Defender)?;
    let mut defender = Engine::with_config(config)?;

    while session.game_over().is_none() && !session.is_draw() {
        if session.is_engine_turn() {
            session.start_engine_turn()?;
            if let Some(response) = session.wait_engine()? {
                println!(
                    "X {:>2}. {:?} via {:?} ({}ms)",
                    session.move_history().len(),
                    response.best_move,
                    response.search_type,
                    response.time_ms
                );
                if response.best_move.is_none() {
                    break;
                }
            }
        } else {
            let result = defender.get_move_with_stats(session.board(), Stone::Defender);
            let Some(pos) = result.best_move else {
                break;
            };
            session.play(pos)?;
            println!(
                "O {:>2}. {} via {:?} ({}ms)",
                session.move_history().len(),
                pos,
                result.search_type,
                result.time_ms
            );
        }
    }

    println!();
    print!("{}", session.board());
    match session.game_over() {
        Some(result) => println!(
            "{:?} wins: {}",
            result.winner,
            result
                .winning_line
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        ),
        None => println!("draw"),
    }
    Ok(())
}

fn main() -> Result<(), EngineError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();
    config.validate()?;

    if args.request {
        answer_request(&args)
    } else {
        self_play(config)
    }
}
