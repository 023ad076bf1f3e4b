//! Player color representation.

use crate::{Offset, Rank};

/// Represents the two players in chess.
///
/// The discriminant is also the value of bit 3 of a [`Piece`](crate::Piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The square delta of a single pawn push for this color.
    #[inline]
    pub const fn forward(self) -> Offset {
        match self {
            Color::White => Offset::NORTH,
            Color::Black => Offset::SOUTH,
        }
    }

    /// The square delta pointing back toward this color's own side.
    ///
    /// Used to find the pawn captured en passant and the en-passant target
    /// behind a double push.
    #[inline]
    pub const fn backward(self) -> Offset {
        match self {
            Color::White => Offset::SOUTH,
            Color::Black => Offset::NORTH,
        }
    }

    /// Rank from which this color's pawns may double push.
    #[inline]
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// Returns the FEN side-to-move character.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn color_index() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn forward_and_backward() {
        assert_eq!(Color::White.forward(), Offset::NORTH);
        assert_eq!(Color::Black.forward(), Offset::SOUTH);
        assert_eq!(Color::White.backward().delta(), -8);
        assert_eq!(Color::Black.backward().delta(), 8);
    }

    #[test]
    fn ranks() {
        assert_eq!(Color::White.pawn_rank(), Rank::R2);
        assert_eq!(Color::Black.pawn_rank(), Rank::R7);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
        assert_eq!(Color::Black.to_fen_char(), 'b');
    }
}
