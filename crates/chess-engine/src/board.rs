//! Chess board state.
//!
//! A [`Board`] keeps three views of the pieces in step: one bitboard per
//! piece, one per color plus the occupancy, and a square-indexed piece
//! array for point lookups. Only [`Board::set_piece`] and
//! [`Board::remove_piece`] touch them, and they always update all three.

use chess_core::{CastlingRights, Color, FenError, FenParser, Piece, PieceType, Square};
use std::fmt;
use tracing::debug;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::Bitboard;

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Bitboards indexed by piece code. Slot 0 and the unused codes stay empty.
    piece_bb: [Bitboard; Piece::COUNT],
    color_bb: [Bitboard; 2],
    occupied: Bitboard,
    pieces: [Piece; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u32,
}

impl Board {
    /// Creates an empty board: White to move, all castling rights, no en
    /// passant square, halfmove 0 and fullmove 1.
    pub fn new() -> Self {
        Board {
            piece_bb: [Bitboard::EMPTY; Piece::COUNT],
            color_bb: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            pieces: [Piece::None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::new();
        board.import_fen(fen)?;
        Ok(board)
    }

    /// Replaces the whole board state with the position in `fen`.
    ///
    /// On error the board is left untouched.
    pub fn import_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let parsed = FenParser::parse(fen).map_err(|e| {
            debug!(fen, error = %e, "rejected FEN");
            e
        })?;

        let mut board = Board::new();
        for sq in Square::all() {
            board.set_piece(sq, parsed.placement[sq.index() as usize]);
        }
        board.side_to_move = parsed.side_to_move;
        board.castling = parsed.castling;
        board.en_passant = parsed.en_passant;
        board.halfmove_clock = parsed.halfmove_clock;
        board.fullmove_number = parsed.fullmove_number;

        *self = board;
        Ok(())
    }

    /// Converts the board to a FEN string.
    pub fn export_fen(&self) -> String {
        FenParser {
            placement: self.pieces,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Puts `piece` on `sq`, replacing whatever stood there.
    ///
    /// Setting `Piece::None` clears the square.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.remove_piece(sq);
        if piece.is_none() {
            return;
        }
        self.piece_bb[piece.index()].set(sq);
        self.color_bb[piece.color().index()].set(sq);
        self.occupied.set(sq);
        self.pieces[sq.index() as usize] = piece;
    }

    /// Clears `sq` and returns the piece that stood there.
    pub fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.pieces[sq.index() as usize];
        if piece.is_some() {
            self.piece_bb[piece.index()].clear(sq);
            self.color_bb[piece.color().index()].clear(sq);
            self.occupied.clear(sq);
            self.pieces[sq.index() as usize] = Piece::None;
        }
        piece
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.pieces[sq.index() as usize]
    }

    /// Color of the piece on `sq`. An empty square reports White.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Color {
        self.piece_at(sq).color()
    }

    #[inline]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.piece_bb[piece.index()]
    }

    #[inline]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.color_bb[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, castling: CastlingRights) {
        self.castling = castling;
    }

    pub(crate) fn set_en_passant(&mut self, en_passant: Option<Square>) {
        self.en_passant = en_passant;
    }

    pub(crate) fn set_halfmove_clock(&mut self, halfmove_clock: u16) {
        self.halfmove_clock = halfmove_clock;
    }

    pub(crate) fn set_fullmove_number(&mut self, fullmove_number: u32) {
        self.fullmove_number = fullmove_number;
    }

    #[inline]
    fn pieces_of(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.piece_bb(Piece::new(piece_type, color))
    }

    /// Square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(PieceType::King, color);
        if kings.is_empty() {
            None
        } else {
            Some(kings.first_square())
        }
    }

    /// Returns true if any piece of `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        let occupied = self.occupied;

        // A pawn of `by` attacks `sq` exactly when a pawn of the other color
        // on `sq` would attack it back.
        if (pawn_attacks(by.opposite(), sq) & self.pieces_of(PieceType::Pawn, by)).is_not_empty() {
            return true;
        }
        if (knight_attacks(sq) & self.pieces_of(PieceType::Knight, by)).is_not_empty() {
            return true;
        }

        let queens = self.pieces_of(PieceType::Queen, by);
        let diagonal = self.pieces_of(PieceType::Bishop, by) | queens;
        if (bishop_attacks(sq, occupied) & diagonal).is_not_empty() {
            return true;
        }
        let straight = self.pieces_of(PieceType::Rook, by) | queens;
        if (rook_attacks(sq, occupied) & straight).is_not_empty() {
            return true;
        }

        (king_attacks(sq) & self.pieces_of(PieceType::King, by)).is_not_empty()
    }

    /// Returns true if `color`'s king is attacked. A side without a king is
    /// never in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|k| self.is_attacked(k, color.opposite()))
    }

    /// Checks that the piece bitboards, color bitboards, occupancy and piece
    /// array all describe the same set of pieces.
    pub fn is_consistent(&self) -> bool {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for piece in Piece::ALL {
            let bb = self.piece_bb(piece);
            if (white & bb).is_not_empty() || (black & bb).is_not_empty() {
                return false;
            }
            match piece.color() {
                Color::White => white |= bb,
                Color::Black => black |= bb,
            }
        }

        // Slot 0 and unused codes must stay empty.
        let all_pieces = white | black;
        let mut every_slot = Bitboard::EMPTY;
        for bb in self.piece_bb {
            every_slot |= bb;
        }
        if every_slot != all_pieces {
            return false;
        }

        if self.color_bb(Color::White) != white
            || self.color_bb(Color::Black) != black
            || self.occupied != all_pieces
        {
            return false;
        }

        Square::all().all(|sq| {
            let piece = self.piece_at(sq);
            if piece.is_none() {
                !self.occupied.contains(sq)
            } else {
                self.piece_bb(piece).contains(sq)
            }
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let piece = self.piece_at(Square::from_index_unchecked(rank * 8 + file));
                let c = piece.to_fen_char().unwrap_or('.');
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn startpos_fen_roundtrip() {
        let board = Board::startpos();
        assert_eq!(board.export_fen(), FenParser::STARTPOS);
        assert!(board.is_consistent());
        assert_eq!(Board::default(), board);
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            KIWIPETE,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b - e3 0 1",
            "8/8/8/8/8/8/8/8 b - - 99 250",
        ] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.export_fen(), fen);
            assert!(board.is_consistent());
        }
    }

    #[test]
    fn new_board_defaults() {
        let board = Board::new();
        assert_eq!(board.occupied(), Bitboard::EMPTY);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.export_fen(), "8/8/8/8/8/8/8/8 w KQkq - 0 1");
    }

    #[test]
    fn failed_import_leaves_board_unchanged() {
        let mut board = Board::from_fen(KIWIPETE).unwrap();
        let before = board.clone();
        let err = board
            .import_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0")
            .unwrap_err();
        assert_eq!(err, FenError::InvalidPartCount(5));
        assert_eq!(board, before);

        assert!(board.import_fen("8/8/8/8/8/8/8/7X w - - 0 1").is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn piece_at() {
        let board = Board::startpos();
        assert_eq!(board.piece_at(Square::E1), Piece::WhiteKing);
        assert_eq!(board.piece_at(Square::E8), Piece::BlackKing);
        assert_eq!(board.piece_at(Square::E4), Piece::None);
        assert_eq!(board.color_at(Square::D8), Color::Black);
        // Empty squares report White.
        assert_eq!(board.color_at(Square::E4), Color::White);
    }

    #[test]
    fn set_and_remove_keep_views_in_step() {
        let mut board = Board::new();
        board.set_piece(Square::D4, Piece::WhiteQueen);
        board.set_piece(Square::D4, Piece::BlackKnight);
        assert_eq!(board.piece_at(Square::D4), Piece::BlackKnight);
        assert_eq!(board.piece_bb(Piece::WhiteQueen), Bitboard::EMPTY);
        assert_eq!(board.color_bb(Color::White), Bitboard::EMPTY);
        assert_eq!(board.color_bb(Color::Black), Bitboard::from_square(Square::D4));
        assert!(board.is_consistent());

        board.set_piece(Square::D4, Piece::None);
        assert_eq!(board.occupied(), Bitboard::EMPTY);
        assert!(board.is_consistent());

        board.set_piece(Square::A1, Piece::WhiteRook);
        assert_eq!(board.remove_piece(Square::A1), Piece::WhiteRook);
        assert_eq!(board.remove_piece(Square::A1), Piece::None);
        assert!(board.is_consistent());
    }

    #[test]
    fn startpos_counts() {
        let board = Board::startpos();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.color_bb(Color::White).count(), 16);
        assert_eq!(board.piece_bb(Piece::BlackPawn).count(), 8);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::new().king_square(Color::White), None);
    }

    #[test]
    fn is_attacked_by_each_piece() {
        let board = Board::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_attacked(Square::C4, Color::Black));
        assert!(board.is_attacked(Square::E4, Color::Black));
        assert!(!board.is_attacked(Square::D4, Color::Black));

        let board = Board::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_attacked(Square::E1, Color::Black));
        assert!(board.in_check(Color::White));

        let board = Board::from_fen("4k3/8/8/8/8/8/2b5/4K3 w - - 0 1").unwrap();
        assert!(board.is_attacked(Square::D1, Color::Black));
        assert!(!board.is_attacked(Square::E1, Color::Black));

        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(board.in_check(Color::White));

        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!board.in_check(Color::White));
        assert!(board.is_attacked(Square::D2, Color::White));
        assert!(board.is_attacked(Square::D7, Color::Black));
    }

    #[test]
    fn queens_attack_along_both_patterns() {
        let board = Board::from_fen("4k3/8/8/8/7q/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.in_check(Color::White));
        assert!(board.is_attacked(Square::H1, Color::Black));
        assert!(board.is_attacked(Square::A4, Color::Black));
        assert!(!board.is_attacked(Square::G1, Color::Black));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/r3K2R w - - 0 1").unwrap();
        assert!(board.in_check(Color::White));
        let board = Board::from_fen("4k3/4r3/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(!board.in_check(Color::White));
        assert!(board.is_attacked(Square::E2, Color::Black));
    }

    #[test]
    fn display_diagram() {
        let text = Board::startpos().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r ");
        assert_eq!(lines[4], "4 . . . . . . . . ");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        /// `Some(piece)` sets a square, `None` clears it.
        fn edit_strategy() -> impl Strategy<Value = (u8, Option<Piece>)> {
            let piece = prop_oneof![
                1 => Just(None),
                3 => proptest::sample::select(Piece::ALL.to_vec()).prop_map(Some),
            ];
            (0u8..64, piece)
        }

        proptest! {
            #[test]
            fn edits_keep_views_in_step(
                edits in proptest::collection::vec(edit_strategy(), 1..200),
            ) {
                let mut board = Board::new();
                let mut expected = [Piece::None; 64];
                for (index, edit) in edits {
                    let sq = Square::from_index_unchecked(index);
                    match edit {
                        Some(piece) => board.set_piece(sq, piece),
                        None => {
                            let removed = board.remove_piece(sq);
                            prop_assert_eq!(removed, expected[index as usize]);
                        }
                    }
                    expected[index as usize] = edit.unwrap_or(Piece::None);
                    prop_assert!(board.is_consistent(), "after {:?} on {}", edit, sq);
                    prop_assert_eq!(board.piece_at(sq), expected[index as usize]);
                }
                for sq in Square::all() {
                    prop_assert_eq!(board.piece_at(sq), expected[sq.index() as usize]);
                }
            }
        }
    }
}
