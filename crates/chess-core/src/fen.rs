//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, Piece, PieceType, Rank, Square};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// Every field is fully validated, so a board can load it without further
/// checks. The engine is responsible for building its bitboards from
/// `placement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece on each square, indexed a1 = 0 through h8 = 63.
    pub placement: [Piece; 64],
    /// Side to move.
    pub side_to_move: Color,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target square, always on rank 3 or 6.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule)
    pub halfmove_clock: u16,
    /// Fullmove number
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// Only canonical FEN is accepted: fields separated by single spaces,
    /// no adjacent digits within a rank, and counters without signs or
    /// leading zeros. Anything accepted prints back identically.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split(' ').collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_piece_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingRights::from_fen(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parse_counter::<u16>(parts[4])
            .ok_or_else(|| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parse_counter::<u32>(parts[5])
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<[Piece; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = [Piece::None; 64];
        // FEN lists rank 8 first.
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            let mut after_digit = false;
            for c in rank_str.chars() {
                let width = match c {
                    '1'..='8' if after_digit => {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "adjacent digits in rank {}",
                            rank + 1
                        )));
                    }
                    '1'..='8' => c as u8 - b'0',
                    _ => {
                        let piece = Piece::from_fen_char(c).map_err(|_| {
                            FenError::InvalidPiecePlacement(format!(
                                "invalid character '{}' in rank {}",
                                c,
                                rank + 1
                            ))
                        })?;
                        if file < 8 {
                            board[(rank * 8 + file) as usize] = piece;
                        }
                        1
                    }
                };
                after_digit = c.is_ascii_digit();
                file += width;
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        Self::check_material(&board)?;
        Ok(board)
    }

    /// Rejects placements no game can reach: more than 16 pieces or 8 pawns
    /// for one side, or a pawn on the first or last rank.
    fn check_material(board: &[Piece; 64]) -> Result<(), FenError> {
        let mut pieces = [0u8; 2];
        let mut pawns = [0u8; 2];
        for (sq, piece) in board.iter().enumerate() {
            if piece.is_none() {
                continue;
            }
            let side = piece.color().index();
            pieces[side] += 1;
            if piece.piece_type() == PieceType::Pawn {
                if !(8..56).contains(&sq) {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "pawn on back rank at {}",
                        Square::from_index_unchecked(sq as u8)
                    )));
                }
                pawns[side] += 1;
            }
        }

        for color in Color::ALL {
            let side = color.index();
            if pieces[side] > 16 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "{} has {} pieces, at most 16 allowed",
                    color, pieces[side]
                )));
            }
            if pawns[side] > 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "{} has {} pawns, at most 8 allowed",
                    color, pawns[side]
                )));
            }
        }
        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank() == Rank::R3 || sq.rank() == Rank::R6 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Formats a square-indexed piece array as a FEN placement field.
    pub fn placement_to_fen(placement: &[Piece; 64]) -> String {
        let mut fen = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match placement[rank * 8 + file].to_fen_char() {
                    Ok(c) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(c);
                    }
                    Err(_) => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        let en_passant = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            Self::placement_to_fen(&self.placement),
            self.side_to_move.to_fen_char(),
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

/// Parses a move counter written as `0` or digits without a leading zero.
fn parse_counter<T: FromStr>(field: &str) -> Option<T> {
    let canonical = match field.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if canonical {
        field.parse().ok()
    } else {
        None
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.placement[Square::E1.index() as usize], Piece::WhiteKing);
        assert_eq!(fen.placement[Square::D8.index() as usize], Piece::BlackQueen);
        assert_eq!(fen.placement[Square::E4.index() as usize], Piece::None);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            FenParser::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        assert_eq!(fen.placement[Square::C6.index() as usize], Piece::BlackKnight);
        assert_eq!(fen.placement[Square::F3.index() as usize], Piece::WhiteKnight);
    }

    #[test]
    fn roundtrip() {
        for original in [
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b - e3 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "8/8/8/8/8/8/8/8 w Kq - 65535 4000000000",
        ] {
            let parsed = FenParser::parse(original).unwrap();
            assert_eq!(parsed.to_fen(), original);
        }
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));

        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::InvalidPartCount(7))
        ));

        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        // Too few ranks
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        // Invalid character 'x' in piece placement
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPP0PPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        // Rank with wrong number of squares (9 instead of 8)
        assert!(matches!(
            FenParser::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Adjacent digits overflowing the rank
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/45 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Short rank
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/7 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn adjacent_digits_rejected() {
        for placement in ["8/8/8/8/8/8/8/44", "8/8/8/8/8/8/8/116", "8/8/8/8/3k22/8/8/8"] {
            let fen = format!("{} w - - 0 1", placement);
            assert!(
                matches!(FenParser::parse(&fen), Err(FenError::InvalidPiecePlacement(_))),
                "{fen}"
            );
        }
    }

    #[test]
    fn separators_must_be_single_spaces() {
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8 w -  - 0 1"),
            Err(FenError::InvalidPartCount(7))
        );
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8\tw - - 0 1"),
            Err(FenError::InvalidPartCount(5))
        );
        assert_eq!(
            FenParser::parse(" 8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPartCount(7))
        );
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 1\n"),
            Err(FenError::InvalidFullmoveNumber("1\n".to_string()))
        );
    }

    #[test]
    fn impossible_material_rejected() {
        for fen in [
            // Seventeen white pieces.
            "QnQQQQQQ/Q6Q/Q7/1Q5Q/3Q3Q/Q4Q1Q/Q6Q/KQQQQ1Qk w - - 0 1",
            // Nine black pawns.
            "4k3/pppppppp/p7/8/8/8/8/4K3 b - - 0 1",
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/p3K3 b - - 0 1",
        ] {
            assert!(
                matches!(FenParser::parse(fen), Err(FenError::InvalidPiecePlacement(_))),
                "{fen}"
            );
        }
        // Full armies are fine.
        assert!(FenParser::parse("qqqqkqqq/pppppppp/8/8/8/8/PPPPPPPP/QQQQKQQQ w - - 0 1").is_ok());
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w qkQK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        // Bad length, bad file, then a rank no double push can produce.
        for ep in ["abc", "x3", "e4", "a1", "e"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert_eq!(
                FenParser::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(ep.to_string()))
            );
        }
    }

    #[test]
    fn invalid_halfmove_clock() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        // Does not fit in 16 bits
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 65536 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        for clock in ["+5", "007", "01", "00", "-"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - - {} 1", clock);
            assert_eq!(
                FenParser::parse(&fen),
                Err(FenError::InvalidHalfmoveClock(clock.to_string()))
            );
        }
    }

    #[test]
    fn invalid_fullmove_number() {
        for number in ["xyz", "+5", "007", "01", "-0"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - - 0 {}", number);
            assert_eq!(
                FenParser::parse(&fen),
                Err(FenError::InvalidFullmoveNumber(number.to_string()))
            );
        }
        // Zero is written canonically and survives.
        let fen = FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 0").unwrap();
        assert_eq!(fen.fullmove_number, 0);
    }

    #[test]
    fn fen_parser_default() {
        let fen = FenParser::default();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn fen_black_to_move() {
        let fen = FenParser::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.en_passant, Some(Square::E3));
    }

    #[test]
    fn fen_partial_castling() {
        let fen = FenParser::parse("8/8/8/8/8/8/8/8 w Kq - 0 1").unwrap();
        assert!(fen.castling.can_castle_kingside(Color::White));
        assert!(!fen.castling.can_castle_queenside(Color::White));
        assert!(!fen.castling.can_castle_kingside(Color::Black));
        assert!(fen.castling.can_castle_queenside(Color::Black));
    }

    #[test]
    fn fen_en_passant_rank_6() {
        let fen = FenParser::parse("8/8/8/8/8/8/8/8 b - d6 0 1").unwrap();
        assert_eq!(fen.en_passant, Some(Square::D6));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn piece_strategy() -> impl Strategy<Value = Piece> {
            prop_oneof![
                3 => Just(Piece::None),
                1 => proptest::sample::select(Piece::ALL.to_vec()),
            ]
        }

        /// Drops pieces the parser would reject: back-rank pawns and
        /// anything past 16 pieces or 8 pawns per side.
        fn reachable(squares: &[Piece]) -> [Piece; 64] {
            let mut placement = [Piece::None; 64];
            let mut pieces = [0; 2];
            let mut pawns = [0; 2];
            for (sq, &piece) in squares.iter().enumerate() {
                if piece.is_none() {
                    continue;
                }
                let side = piece.color().index();
                let pawn = piece.piece_type() == PieceType::Pawn;
                if pieces[side] == 16 || (pawn && (pawns[side] == 8 || !(8..56).contains(&sq))) {
                    continue;
                }
                pieces[side] += 1;
                if pawn {
                    pawns[side] += 1;
                }
                placement[sq] = piece;
            }
            placement
        }

        proptest! {
            #[test]
            fn placement_roundtrip(
                squares in proptest::collection::vec(piece_strategy(), 64),
                black in any::<bool>(),
                castling in 0u8..16,
                halfmove in any::<u16>(),
                fullmove in any::<u32>(),
            ) {
                let placement = reachable(&squares);
                let fen = FenParser {
                    placement,
                    side_to_move: if black { Color::Black } else { Color::White },
                    castling: CastlingRights::new(castling),
                    en_passant: None,
                    halfmove_clock: halfmove,
                    fullmove_number: fullmove,
                };
                let text = fen.to_fen();
                let parsed = FenParser::parse(&text).unwrap();
                prop_assert_eq!(&parsed, &fen);
                prop_assert_eq!(parsed.to_fen(), text);
            }
        }
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(format!("{}", err).contains("x"));

        let err = FenError::InvalidPiecePlacement("bad".to_string());
        assert!(format!("{}", err).contains("bad"));

        let err = FenError::InvalidCastlingRights("XYZ".to_string());
        assert!(format!("{}", err).contains("XYZ"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));

        let err = FenError::InvalidHalfmoveClock("abc".to_string());
        assert!(format!("{}", err).contains("abc"));

        let err = FenError::InvalidFullmoveNumber("xyz".to_string());
        assert!(format!("{}", err).contains("xyz"));
    }
}
