//! Chess piece representation.
//!
//! A [`Piece`] packs its color into bit 3 and its [`PieceType`] into the low
//! three bits, so white pieces are 1-6 and black pieces are 9-14. The empty
//! square is [`Piece::None`] (0), which reports [`Color::White`] as its color.

use crate::Color;
use thiserror::Error;

/// Errors from piece conversions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PieceError {
    #[error("cannot convert an empty square to a FEN character")]
    NoFenChar,

    #[error("invalid FEN piece character '{0}'")]
    InvalidFenChar(char),
}

/// The six piece classes, plus `None` for an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    /// All real piece classes in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Promotion targets, in the order promotions are generated.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ];

    /// Returns the numeric class (0-6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a piece class from the low three bits of a piece code.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(PieceType::None),
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::Bishop),
            4 => Some(PieceType::Rook),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceType::None => "None",
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece, or `None` for an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Piece {
    #[default]
    None = 0,
    WhitePawn = 1,
    WhiteKnight = 2,
    WhiteBishop = 3,
    WhiteRook = 4,
    WhiteQueen = 5,
    WhiteKing = 6,
    BlackPawn = 9,
    BlackKnight = 10,
    BlackBishop = 11,
    BlackRook = 12,
    BlackQueen = 13,
    BlackKing = 14,
}

/// Indexed by piece code; blanks are unused codes.
const FEN_CHARS: &[u8; 15] = b" PNBRQK  pnbrqk";

impl Piece {
    /// Number of slots needed for a table indexed by piece code.
    pub const COUNT: usize = 15;

    /// All real pieces, white first.
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    /// Builds the piece of the given class and color.
    ///
    /// `PieceType::None` yields `Piece::None` regardless of color.
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        if matches!(piece_type, PieceType::None) {
            return Piece::None;
        }
        match Self::from_code(piece_type as u8 | ((color as u8) << 3)) {
            Some(piece) => piece,
            None => Piece::None,
        }
    }

    /// Creates a piece from its 4-bit code. Unused codes return `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Piece::None),
            1 => Some(Piece::WhitePawn),
            2 => Some(Piece::WhiteKnight),
            3 => Some(Piece::WhiteBishop),
            4 => Some(Piece::WhiteRook),
            5 => Some(Piece::WhiteQueen),
            6 => Some(Piece::WhiteKing),
            9 => Some(Piece::BlackPawn),
            10 => Some(Piece::BlackKnight),
            11 => Some(Piece::BlackBishop),
            12 => Some(Piece::BlackRook),
            13 => Some(Piece::BlackQueen),
            14 => Some(Piece::BlackKing),
            _ => None,
        }
    }

    /// Returns the 4-bit code, also the index into per-piece tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the color of this piece. The empty square is White.
    #[inline]
    pub const fn color(self) -> Color {
        if (self as u8) & 0b1000 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the piece class.
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match PieceType::from_bits(self as u8 & 0b111) {
            Some(t) => t,
            None => PieceType::None,
        }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Piece::None)
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the FEN character for this piece.
    pub fn to_fen_char(self) -> Result<char, PieceError> {
        if self.is_none() {
            return Err(PieceError::NoFenChar);
        }
        Ok(FEN_CHARS[self.index()] as char)
    }

    /// Parses a FEN piece character.
    pub fn from_fen_char(c: char) -> Result<Self, PieceError> {
        let code = FEN_CHARS
            .iter()
            .position(|&b| b != b' ' && b as char == c)
            .ok_or(PieceError::InvalidFenChar(c))?;
        Self::from_code(code as u8).ok_or(PieceError::InvalidFenChar(c))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Piece::None => write!(f, "None"),
            piece => write!(f, "{} {}", piece.color(), piece.piece_type()),
        }
    }
}
