//! Castling rights.

use crate::{Color, FenError, Square};
use std::fmt;

/// Castling rights as a 4-bit set.
///
/// White kingside is bit 0, white queenside bit 1, black kingside bit 2 and
/// black queenside bit 3. The raw value is what a move stores to restore the
/// rights on unmake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates castling rights from flags. Bits above the low four are dropped.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    #[inline]
    const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    #[inline]
    const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(Self::kingside_flag(color) | Self::queenside_flag(color));
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_flag(color);
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_flag(color);
    }

    /// Drops the right tied to a rook corner when anything leaves or lands
    /// on it. Other squares leave the rights unchanged.
    pub fn remove_for_corner(&mut self, square: Square) {
        match square {
            Square::H1 => self.remove_kingside(Color::White),
            Square::A1 => self.remove_queenside(Color::White),
            Square::H8 => self.remove_kingside(Color::Black),
            Square::A8 => self.remove_queenside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field.
    ///
    /// Accepts `-` or a non-empty, duplicate-free subsequence of `KQkq` in
    /// that order.
    pub fn from_fen(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }
        if field.is_empty() {
            return Err(FenError::InvalidCastlingRights(field.to_string()));
        }

        let mut flags = 0u8;
        let mut last = 0u8;
        for c in field.chars() {
            let flag = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}' in '{}'",
                        c, field
                    )))
                }
            };
            if flag <= last {
                return Err(FenError::InvalidCastlingRights(format!(
                    "'{}' is out of order or repeated",
                    field
                )));
            }
            last = flag;
            flags |= flag;
        }
        Ok(Self(flags))
    }

    /// Formats as a FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        if self.can_castle_kingside(Color::White) {
            s.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            s.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            s.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            s.push('q');
        }
        s
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}
