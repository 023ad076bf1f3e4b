//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Pseudo-legal moves that leave the mover in check are skipped.

use super::{generate_moves, MoveList, MoveStack};
use crate::{Board, Move};
use tracing::debug;

/// Counts the number of legal leaf nodes at the given depth.
///
/// `stack` supplies one move buffer per ply, starting at its current depth.
/// The board is restored before returning.
pub fn perft(board: &mut Board, stack: &mut MoveStack, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let count = stack.generate(board);
    let us = board.side_to_move();
    let mut nodes = 0u64;
    for i in 0..count {
        let mut m = stack.current()[i];
        m.make(board);
        if !board.in_check(us) {
            if depth == 1 {
                nodes += 1;
            } else {
                stack.descend();
                nodes += perft(board, stack, depth - 1);
                stack.ascend();
            }
        }
        m.unmake(board);
    }
    nodes
}

/// Legal moves at the root of `board`.
fn legal_root_moves(board: &Board) -> Vec<Move> {
    let mut scratch = board.clone();
    let us = board.side_to_move();
    let mut moves = MoveList::new();
    generate_moves(board, &mut moves);

    moves
        .iter()
        .copied()
        .filter(|m| {
            let mut m = *m;
            m.make(&mut scratch);
            let legal = !scratch.in_check(us);
            m.unmake(&mut scratch);
            legal
        })
        .collect()
}

/// Counts the nodes below one root move.
fn count_after(board: &mut Board, stack: &mut MoveStack, mut m: Move, depth: u32) -> u64 {
    m.make(board);
    let nodes = perft(board, stack, depth - 1);
    m.unmake(board);
    nodes
}

/// Perft with divide - shows node count for each legal root move, sorted by
/// UCI text. Useful for debugging to identify which moves have incorrect
/// counts. Depth 0 has no root moves and returns an empty list.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let roots = legal_root_moves(board);
    debug!(depth, moves = roots.len(), "perft divide");

    let mut scratch = board.clone();
    let mut stack = MoveStack::new(depth as usize);
    let mut results: Vec<(String, u64)> = roots
        .into_iter()
        .map(|m| (m.to_uci(), count_after(&mut scratch, &mut stack, m, depth)))
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Perft split across `threads` scoped worker threads by root move.
///
/// Each worker owns a board clone and its own move stack.
pub fn perft_parallel(board: &Board, depth: u32, threads: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let roots = legal_root_moves(board);
    let threads = threads.clamp(1, roots.len().max(1));
    debug!(depth, moves = roots.len(), threads, "perft parallel");

    let chunk_size = roots.len().div_ceil(threads).max(1);
    std::thread::scope(|scope| {
        let workers: Vec<_> = roots
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut scratch = board.clone();
                    let mut stack = MoveStack::new(depth as usize);
                    chunk
                        .iter()
                        .map(|&m| count_after(&mut scratch, &mut stack, m, depth))
                        .sum::<u64>()
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| match worker.join() {
                Ok(nodes) => nodes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .sum()
    })
}
