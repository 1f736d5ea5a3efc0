//! Perft divide runner for chasing move generation bugs.
//!
//! Usage:
//! `cargo run --release --bin perft_divide`
//! `cargo run --release --bin perft_divide -- --depth 4 --fen "<fen>"`
//!
//! Prints one `move: nodes` line per root move, then the total. Compare the
//! output against another engine's divide to find the diverging subtree.

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use mailbox_chess::chess_errors::ChessResult;
use mailbox_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use mailbox_chess::game_state::game_state::GameState;
use mailbox_chess::move_generation::perft::{perft_counts, perft_divide};

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    arg_value(flag)
        .and_then(|v| v.parse::<u8>().ok())
        .map_or(default, |v| v.max(1))
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let depth = parse_arg_u8("--depth", 3);
    let fen = arg_value("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let mut game = GameState::from_fen(&fen)?;

    println!("{}", game.render());
    println!("fen: {fen}");
    println!("depth: {depth}");

    let started = Instant::now();
    let divide = perft_divide(&mut game, depth)?;
    let elapsed = started.elapsed();

    let mut total = 0u64;
    for (lan, nodes) in &divide {
        println!("{lan}: {nodes}");
        total += nodes;
    }

    let nps = (total as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;
    println!();
    println!("moves: {}", divide.len());
    println!("nodes: {total}");
    println!("elapsed_ms: {} nps: {nps}", elapsed.as_millis());

    let counts = perft_counts(&mut game, depth)?;
    println!(
        "captures: {} ep: {} castles: {} promotions: {} checks: {} mates: {}",
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates
    );

    Ok(())
}
