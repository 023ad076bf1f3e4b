//! Move classification.

use crate::{Color, Piece, PieceType};
use std::fmt;
use thiserror::Error;

/// Errors from move-type queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveTypeError {
    #[error("{0} is not a promotion")]
    NotAPromotion(MoveType),
}

/// The kind of a move, as stored in the low four bits of a packed move.
///
/// Bit 2 marks a capture and bit 3 a promotion. For promotions the low two
/// bits select the new piece: knight, bishop, rook, queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MoveType {
    #[default]
    Quiet = 0,
    DoublePawnPush = 1,
    KingSideCastle = 2,
    QueenSideCastle = 3,
    Capture = 4,
    EnPassant = 5,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

impl MoveType {
    const CAPTURE_BIT: u8 = 0b0100;
    const PROMOTION_BIT: u8 = 0b1000;

    /// Decodes a 4-bit move type. The unused codes 6 and 7 decode as `Quiet`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b1111 {
            1 => MoveType::DoublePawnPush,
            2 => MoveType::KingSideCastle,
            3 => MoveType::QueenSideCastle,
            4 => MoveType::Capture,
            5 => MoveType::EnPassant,
            8 => MoveType::KnightPromotion,
            9 => MoveType::BishopPromotion,
            10 => MoveType::RookPromotion,
            11 => MoveType::QueenPromotion,
            12 => MoveType::KnightPromotionCapture,
            13 => MoveType::BishopPromotionCapture,
            14 => MoveType::RookPromotionCapture,
            15 => MoveType::QueenPromotionCapture,
            _ => MoveType::Quiet,
        }
    }

    /// The promotion move type for a target class.
    ///
    /// Returns `None` unless `piece_type` is a knight, bishop, rook or queen.
    pub const fn promotion(piece_type: PieceType, capture: bool) -> Option<Self> {
        let low = match piece_type {
            PieceType::Knight => 0,
            PieceType::Bishop => 1,
            PieceType::Rook => 2,
            PieceType::Queen => 3,
            _ => return None,
        };
        let capture_bit = if capture { Self::CAPTURE_BIT } else { 0 };
        Some(Self::from_bits(Self::PROMOTION_BIT | capture_bit | low))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// True for captures, en passant and capturing promotions.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self as u8 & Self::CAPTURE_BIT != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self as u8 & Self::PROMOTION_BIT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveType::KingSideCastle | MoveType::QueenSideCastle)
    }

    /// The class a promotion turns the pawn into.
    pub const fn promoted_type(self) -> Result<PieceType, MoveTypeError> {
        if !self.is_promotion() {
            return Err(MoveTypeError::NotAPromotion(self));
        }
        Ok(PieceType::PROMOTIONS[(self as u8 & 0b11) as usize])
    }

    /// The colored piece a promotion places on the board.
    pub const fn promoted_piece(self, color: Color) -> Result<Piece, MoveTypeError> {
        match self.promoted_type() {
            Ok(piece_type) => Ok(Piece::new(piece_type, color)),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Check status recorded on a move, in the packed move's two check bits.
///
/// The generator never computes it. Callers that test legality may set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CheckType {
    #[default]
    None = 0,
    Check = 1,
    Checkmate = 2,
    Stalemate = 3,
}

impl CheckType {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => CheckType::Check,
            2 => CheckType::Checkmate,
            3 => CheckType::Stalemate,
            _ => CheckType::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_values() {
        assert_eq!(MoveType::Quiet.bits(), 0);
        assert_eq!(MoveType::EnPassant.bits(), 5);
        assert_eq!(MoveType::KnightPromotion.bits(), 8);
        assert_eq!(MoveType::QueenPromotionCapture.bits(), 15);
        for bits in 0..16u8 {
            let t = MoveType::from_bits(bits);
            if bits == 6 || bits == 7 {
                assert_eq!(t, MoveType::Quiet);
            } else {
                assert_eq!(t.bits(), bits);
            }
        }
    }

    #[test]
    fn capture_and_promotion_flags() {
        assert!(MoveType::Capture.is_capture());
        assert!(MoveType::EnPassant.is_capture());
        assert!(MoveType::RookPromotionCapture.is_capture());
        assert!(!MoveType::RookPromotion.is_capture());
        assert!(!MoveType::DoublePawnPush.is_capture());

        assert!(MoveType::KnightPromotion.is_promotion());
        assert!(MoveType::QueenPromotionCapture.is_promotion());
        assert!(!MoveType::EnPassant.is_promotion());

        assert!(MoveType::KingSideCastle.is_castle());
        assert!(!MoveType::Capture.is_castle());
    }

    #[test]
    fn promotion_constructor() {
        assert_eq!(
            MoveType::promotion(PieceType::Queen, false),
            Some(MoveType::QueenPromotion)
        );
        assert_eq!(
            MoveType::promotion(PieceType::Knight, true),
            Some(MoveType::KnightPromotionCapture)
        );
        assert_eq!(MoveType::promotion(PieceType::King, false), None);
        assert_eq!(MoveType::promotion(PieceType::Pawn, true), None);
    }

    #[test]
    fn promoted_piece() {
        assert_eq!(
            MoveType::BishopPromotion.promoted_piece(Color::White),
            Ok(Piece::WhiteBishop)
        );
        assert_eq!(
            MoveType::RookPromotionCapture.promoted_piece(Color::Black),
            Ok(Piece::BlackRook)
        );
        assert_eq!(
            MoveType::Capture.promoted_piece(Color::White),
            Err(MoveTypeError::NotAPromotion(MoveType::Capture))
        );
    }

    #[test]
    fn check_type_bits() {
        assert_eq!(CheckType::from_bits(0), CheckType::None);
        assert_eq!(CheckType::from_bits(2), CheckType::Checkmate);
        assert_eq!(CheckType::from_bits(7), CheckType::Stalemate);
    }
}
