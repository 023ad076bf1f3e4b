//! Reversible move representation.

use chess_core::{CastlingRights, CheckType, Color, MoveType, Piece, PieceType, Square};
use std::fmt;

use crate::Board;

/// A chess move packed into a single word, together with the board state it
/// needs to undo itself.
///
/// Layout (low bit first):
///
/// | bits  | field                         |
/// |-------|-------------------------------|
/// | 0-3   | move type                     |
/// | 4-7   | captured piece                |
/// | 8-11  | moving piece                  |
/// | 12-17 | to square                     |
/// | 18-23 | from square                   |
/// | 24-25 | check type                    |
/// | 26-41 | halfmove clock before make    |
/// | 42-47 | en passant square before make |
/// | 48-51 | castling rights before make   |
///
/// An en passant field of 0 means "none": a1 is never an en passant target.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u64);

const TYPE_SHIFT: u32 = 0;
const TO_PIECE_SHIFT: u32 = 4;
const FROM_PIECE_SHIFT: u32 = 8;
const TO_SHIFT: u32 = 12;
const FROM_SHIFT: u32 = 18;
const CHECK_SHIFT: u32 = 24;
const HALFMOVE_SHIFT: u32 = 26;
const EP_SHIFT: u32 = 42;
const CASTLING_SHIFT: u32 = 48;

/// Bits written by `set_all`; the undo fields above them survive.
const PRIMARY_MASK: u64 = (1 << HALFMOVE_SHIFT) - 1;
const UNDO_MASK: u64 = !PRIMARY_MASK;

impl Move {
    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);

    /// Creates a new move with no check status and empty undo fields.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        from_piece: Piece,
        to_piece: Piece,
        move_type: MoveType,
    ) -> Self {
        Move(
            (move_type as u64) << TYPE_SHIFT
                | (to_piece as u64) << TO_PIECE_SHIFT
                | (from_piece as u64) << FROM_PIECE_SHIFT
                | (to.index() as u64) << TO_SHIFT
                | (from.index() as u64) << FROM_SHIFT,
        )
    }

    /// Overwrites the primary fields in place and resets the check status.
    #[inline]
    pub fn set_all(
        &mut self,
        from: Square,
        to: Square,
        from_piece: Piece,
        to_piece: Piece,
        move_type: MoveType,
    ) {
        self.0 = (self.0 & UNDO_MASK) | Move::new(from, to, from_piece, to_piece, move_type).0;
    }

    #[inline]
    pub fn set_check(&mut self, check: CheckType) {
        self.0 = (self.0 & !(0b11 << CHECK_SHIFT)) | (check as u64) << CHECK_SHIFT;
    }

    #[inline]
    const fn field(self, shift: u32, bits: u32) -> u64 {
        (self.0 >> shift) & ((1 << bits) - 1)
    }

    #[inline]
    fn piece_field(self, shift: u32) -> Piece {
        Piece::from_code(self.field(shift, 4) as u8).unwrap_or(Piece::None)
    }

    /// Returns the source square.
    #[inline]
    pub fn from(self) -> Square {
        Square::from_index_unchecked(self.field(FROM_SHIFT, 6) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub fn to(self) -> Square {
        Square::from_index_unchecked(self.field(TO_SHIFT, 6) as u8)
    }

    /// The piece that moves.
    #[inline]
    pub fn from_piece(self) -> Piece {
        self.piece_field(FROM_PIECE_SHIFT)
    }

    /// The piece captured, `Piece::None` for non-captures. For en passant
    /// this is the pawn taken behind the destination.
    #[inline]
    pub fn to_piece(self) -> Piece {
        self.piece_field(TO_PIECE_SHIFT)
    }

    #[inline]
    pub fn move_type(self) -> MoveType {
        MoveType::from_bits(self.field(TYPE_SHIFT, 4) as u8)
    }

    #[inline]
    pub fn check(self) -> CheckType {
        CheckType::from_bits(self.field(CHECK_SHIFT, 2) as u8)
    }

    #[inline]
    pub fn prev_castling_rights(self) -> CastlingRights {
        CastlingRights::new(self.field(CASTLING_SHIFT, 4) as u8)
    }

    #[inline]
    pub fn prev_en_passant(self) -> Option<Square> {
        match self.field(EP_SHIFT, 6) {
            0 => None,
            index => Some(Square::from_index_unchecked(index as u8)),
        }
    }

    #[inline]
    pub fn prev_halfmove_clock(self) -> u16 {
        self.field(HALFMOVE_SHIFT, 16) as u16
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.move_type().is_capture()
    }

    #[inline]
    pub fn is_promotion(self) -> bool {
        self.move_type().is_promotion()
    }

    /// The piece a promotion leaves on the destination, or `None` for other
    /// moves.
    pub fn promoted_piece(self) -> Option<Piece> {
        self.move_type()
            .promoted_piece(self.from_piece().color())
            .ok()
    }

    fn save_undo(&mut self, board: &Board) {
        let ep = board.en_passant().map_or(0, |sq| sq.index() as u64);
        self.0 = (self.0 & PRIMARY_MASK)
            | (board.halfmove_clock() as u64) << HALFMOVE_SHIFT
            | ep << EP_SHIFT
            | (board.castling_rights().raw() as u64) << CASTLING_SHIFT;
    }

    /// Applies the move to `board`, first recording the castling rights, en
    /// passant square and halfmove clock it will overwrite.
    pub fn make(&mut self, board: &mut Board) {
        self.save_undo(board);

        let from = self.from();
        let to = self.to();
        let mover = self.from_piece();
        let color = mover.color();
        let move_type = self.move_type();

        board.remove_piece(from);
        match move_type {
            MoveType::KingSideCastle => {
                board.set_piece(to, mover);
                relocate(board, Square::H1.relative(color), Square::F1.relative(color));
            }
            MoveType::QueenSideCastle => {
                board.set_piece(to, mover);
                relocate(board, Square::A1.relative(color), Square::D1.relative(color));
            }
            MoveType::EnPassant => {
                board.set_piece(to, mover);
                board.remove_piece(to.offset_unchecked(color.backward()));
            }
            t if t.is_promotion() => {
                let promoted = t.promoted_piece(color).unwrap_or(mover);
                board.set_piece(to, promoted);
            }
            _ => board.set_piece(to, mover),
        }

        let mut castling = board.castling_rights();
        if mover.piece_type() == PieceType::King {
            castling.remove_color(color);
        }
        castling.remove_for_corner(from);
        castling.remove_for_corner(to);
        board.set_castling_rights(castling);

        board.set_en_passant(if move_type == MoveType::DoublePawnPush {
            Some(from.offset_unchecked(color.forward()))
        } else {
            None
        });

        let resets_clock = mover.piece_type() == PieceType::Pawn
            || move_type.is_capture()
            || move_type.is_promotion();
        board.set_halfmove_clock(if resets_clock {
            0
        } else {
            board.halfmove_clock().saturating_add(1)
        });

        if color == Color::Black {
            board.set_fullmove_number(board.fullmove_number().wrapping_add(1));
        }
        board.set_side_to_move(color.opposite());
    }

    /// Reverses a previous `make` of this same move on the same board.
    pub fn unmake(&self, board: &mut Board) {
        let from = self.from();
        let to = self.to();
        let mover = self.from_piece();
        let color = mover.color();

        match self.move_type() {
            MoveType::KingSideCastle => {
                board.remove_piece(to);
                relocate(board, Square::F1.relative(color), Square::H1.relative(color));
            }
            MoveType::QueenSideCastle => {
                board.remove_piece(to);
                relocate(board, Square::D1.relative(color), Square::A1.relative(color));
            }
            MoveType::EnPassant => {
                board.remove_piece(to);
                board.set_piece(to.offset_unchecked(color.backward()), self.to_piece());
            }
            // Puts the captured piece back, or clears the square.
            _ => board.set_piece(to, self.to_piece()),
        }
        board.set_piece(from, mover);

        board.set_side_to_move(color);
        if color == Color::Black {
            board.set_fullmove_number(board.fullmove_number().wrapping_sub(1));
        }
        board.set_castling_rights(self.prev_castling_rights());
        board.set_en_passant(self.prev_en_passant());
        board.set_halfmove_clock(self.prev_halfmove_clock());
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.move_type().promoted_type() {
            Ok(PieceType::Knight) => "n",
            Ok(PieceType::Bishop) => "b",
            Ok(PieceType::Rook) => "r",
            Ok(PieceType::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to(), promo)
    }
}

fn relocate(board: &mut Board, from: Square, to: Square) {
    let piece = board.remove_piece(from);
    board.set_piece(to, piece);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
