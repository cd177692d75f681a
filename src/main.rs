// Console self-play: two engines play a full game against each other.
//
// Usage: othello_engine [budget-ms] [book-file]
//
// With a book file, Black loads it before the game (if it exists) and saves
// its book back afterwards.

use othello_engine::agent::ai::{AiPlayer, BookTable};
use othello_engine::agent::{GameResult, Player};
use othello_engine::config::EngineConfig;
use othello_engine::game_repr::{Color, Position};
use othello_engine::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const DEFAULT_BUDGET_MS: u64 = 1000;

fn main() -> ExitCode {
    let config = EngineConfig::default().with_table_slots(1 << 22);
    init_logging(config.log_level);

    let mut args = std::env::args().skip(1);
    let budget = match args.next().map(|arg| arg.parse::<u64>()) {
        None => Duration::from_millis(DEFAULT_BUDGET_MS),
        Some(Ok(ms)) => Duration::from_millis(ms),
        Some(Err(err)) => {
            eprintln!("invalid budget: {err}");
            return ExitCode::FAILURE;
        }
    };
    let book: Option<PathBuf> = args.next().map(PathBuf::from);

    let mut black = AiPlayer::with_book(config.clone(), "Black engine".to_string());
    let mut white = AiPlayer::new(config, "White engine".to_string());

    if let Some(path) = book.as_ref().filter(|path| path.exists()) {
        if let Err(err) = black.load_book(path) {
            log::warn!("starting without a book: {err}");
        }
    }

    let result = play(&mut black, &mut white, budget);
    black.game_ended(result);
    white.game_ended(result);

    if let Some(path) = book {
        if let Err(err) = black.save_book(&path) {
            eprintln!("could not save book to {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn play(black: &mut AiPlayer<BookTable>, white: &mut impl Player, budget: Duration) -> GameResult {
    let mut pos = Position::new();
    println!("{pos}");

    while !pos.is_terminal() {
        let to_move = pos.current_player();
        if pos.legal_moves().is_empty() {
            println!("{to_move} passes");
            if let Err(err) = pos.skip_turn() {
                log::error!("{err}");
                break;
            }
            continue;
        }

        let player: &mut dyn Player = match to_move {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let result = player.get_move(&pos.to_snapshot(), to_move, budget);

        let Some(mv) = result.best_move else {
            println!("{} found no move in time and forfeits", player.name());
            return GameResult::from_winner(Some(to_move.opposite()));
        };
        if let Err(err) = pos.place(mv) {
            println!("{} forfeits: {err}", player.name());
            return GameResult::from_winner(Some(to_move.opposite()));
        }

        println!(
            "{} plays {mv} (depth {}, score {:.1}, {} nodes, {} ms)",
            player.name(),
            result.depth_reached,
            result.score,
            result.nodes_evaluated,
            result.time_ms
        );
        println!("{pos}");
    }

    let result = GameResult::from_winner(pos.winner());
    println!(
        "{result:?}: {} - {}",
        pos.disc_count(Color::Black),
        pos.disc_count(Color::White)
    );
    result
}
