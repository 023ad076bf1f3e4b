//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the bitboard engine:
//! - [`Piece`], [`PieceType`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Direction`] and [`Offset`] for stepping between squares
//! - [`CastlingRights`], [`MoveType`] and [`CheckType`] for move bookkeeping
//! - FEN parsing and serialization

mod castling;
mod color;
mod direction;
mod fen;
mod move_type;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use direction::{Direction, Offset};
pub use fen::{FenError, FenParser};
pub use move_type::{CheckType, MoveType, MoveTypeError};
pub use piece::{Piece, PieceError, PieceType};
pub use square::{File, Rank, Square, SquareError};
