//! Bitboard chess rules core.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit board representation with table-driven bit scans
//! - [`attacks`] - empty-board attack tables and blocker-aware attack queries
//! - [`Board`] - position state with FEN import/export and attack detection
//! - [`Move`] - packed moves that carry their own undo information
//! - Pseudo-legal move generation and perft
//!
//! # Architecture
//!
//! The board keeps one bitboard per piece and per color next to a
//! square-indexed piece array. Moves are applied and reverted in place, and
//! generation writes into caller-owned buffers, so search allocates nothing
//! per node. The attack tables are process-wide and immutable once built.
//!
//! # Example
//!
//! ```
//! use chess_engine::{generate_moves, Board, MoveList};
//!
//! let mut board = Board::startpos();
//! let mut moves = MoveList::new();
//! let count = generate_moves(&board, &mut moves);
//! assert_eq!(count, 20);
//!
//! let mut m = moves[0];
//! m.make(&mut board);
//! m.unmake(&mut board);
//! assert_eq!(board, Board::startpos());
//! ```

pub mod attacks;
mod bitboard;
mod board;
pub mod movegen;
mod mov;

pub use attacks::{attacks_for, Attacker};
pub use bitboard::{
    bit_scan_forward, bit_scan_reverse, is_square, pop_count, Bitboard, BitboardIter,
};
pub use board::Board;
pub use mov::Move;
pub use movegen::perft::{perft, perft_divide, perft_parallel};
pub use movegen::{generate_moves, MoveList, MoveStack};

/// Builds the attack and popcount tables now instead of on first use.
pub fn init() {
    bitboard::popcount_table();
    attacks::tables();
}
