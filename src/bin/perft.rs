//! Perft divide tool.
//!
//! Usage:
//! `cargo run --release --bin perft -- <depth> [fen...]`

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use smash_chess::game_state::board::Board;
use smash_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use smash_chess::move_generation::perft::divide;

#[derive(Debug, Parser)]
#[command(name = "perft", about = "Count legal move paths per root move")]
struct Args {
    /// Depth in plies.
    depth: u8,

    /// Position as six FEN fields; defaults to the starting position.
    fen: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let fen = if args.fen.is_empty() {
        STARTING_POSITION_FEN.to_owned()
    } else {
        args.fen.join(" ")
    };

    let mut board = match Board::from_fen(&fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let started = Instant::now();
    let split = match divide(&mut board, args.depth) {
        Ok(split) => split,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut total = 0u64;
    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    if args.depth == 0 {
        total = 1;
    }
    let elapsed = started.elapsed();
    println!();
    println!("Moves: {}", split.len());
    println!("Nodes: {total}");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    ExitCode::SUCCESS
}
