//! Perft - counts move-generation leaf nodes from a position.
//!
//! Compares the engine against published node counts. `--divide` breaks the
//! total down by root move, which narrows a mismatch to a single line.

use anyhow::Context;
use chess_core::FenParser;
use chess_engine::{perft_divide, perft_parallel, Board};
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Perft - counts leaf nodes of the move tree.
#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Counts legal move-tree leaf nodes to validate move generation")]
struct Args {
    /// Position to search, as FEN
    #[arg(long, default_value = FenParser::STARTPOS)]
    fen: String,

    /// Search depth in plies
    #[arg(long, default_value = "4")]
    depth: u32,

    /// Print the node count of each root move
    #[arg(long)]
    divide: bool,

    /// Worker threads for the root split
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    threads: u16,

    /// Print the board before searching
    #[arg(long)]
    show: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    tracing::info!("FEN: {}", args.fen);
    tracing::info!("Depth: {}", args.depth);
    tracing::info!("Threads: {}", args.threads);

    chess_engine::init();
    let board = Board::from_fen(&args.fen)
        .with_context(|| format!("invalid FEN '{}'", args.fen))?;

    if args.show {
        println!("{board}");
        println!("{}", board.export_fen());
        println!();
    }

    let start = Instant::now();
    let nodes = if args.divide {
        let results = perft_divide(&board, args.depth);
        for (uci, count) in &results {
            println!("{uci}: {count}");
        }
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        println!();
        println!("Moves: {}", results.len());
        // Depth 0 has no root moves but still counts the position itself.
        if args.depth == 0 { 1 } else { total }
    } else {
        perft_parallel(&board, args.depth, usize::from(args.threads))
    };
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");

    let secs = elapsed.as_secs_f64();
    let nps = if secs > 0.0 { nodes as f64 / secs } else { 0.0 };
    tracing::info!("Elapsed: {:.3}s ({:.0} nodes/s)", secs, nps);

    Ok(())
}
