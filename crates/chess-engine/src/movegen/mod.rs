//! Pseudo-legal move generation.
//!
//! Moves are written into caller-owned buffers. Castling comes first, then
//! the side to move's pieces in square order. The generator does not check
//! that the mover's king is safe afterwards; callers filter with
//! make, [`Board::in_check`], unmake.

pub mod perft;

use crate::bitboard::is_square;
use crate::{Board, Move};
use chess_core::{Color, Direction, MoveType, Piece, PieceType, Rank, Square};

/// A list of moves with a fixed maximum capacity.
///
/// The capacity covers any board, including ones assembled square by square
/// with [`Board::set_piece`], so generation never runs out of room.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves any position can generate.
    ///
    /// No piece reaches more than 27 squares (a centralized queen). Pawns
    /// top out at 12 with promotions, and a king at 10 with both castles.
    pub const MAX_MOVES: usize = 64 * 27;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Overwrites the next slot in place.
    #[inline]
    pub fn push(
        &mut self,
        from: Square,
        to: Square,
        from_piece: Piece,
        to_piece: Piece,
        move_type: MoveType,
    ) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len].set_all(from, to, from_piece, to_piece, move_type);
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Iterates the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// One move buffer per search depth, reused across calls.
///
/// The caller moves the depth cursor with [`descend`](Self::descend) and
/// [`ascend`](Self::ascend) around each recursive call. Each search thread
/// owns its own stack.
#[derive(Debug, Clone)]
pub struct MoveStack {
    lists: Vec<MoveList>,
    depth: usize,
}

impl MoveStack {
    /// Preallocates buffers for `max_depth` plies. Deeper searches grow the
    /// stack on demand.
    pub fn new(max_depth: usize) -> Self {
        MoveStack {
            lists: (0..max_depth.max(1)).map(|_| MoveList::new()).collect(),
            depth: 0,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Moves the cursor one ply deeper.
    pub fn descend(&mut self) {
        self.depth += 1;
        if self.depth == self.lists.len() {
            self.lists.push(MoveList::new());
        }
    }

    /// Moves the cursor one ply back up.
    pub fn ascend(&mut self) {
        debug_assert!(self.depth > 0, "ascend past the root");
        self.depth = self.depth.saturating_sub(1);
    }

    /// The buffer at the current depth.
    #[inline]
    pub fn current(&self) -> &MoveList {
        &self.lists[self.depth]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut MoveList {
        &mut self.lists[self.depth]
    }

    /// Generates into the current depth's buffer and returns the count.
    #[inline]
    pub fn generate(&mut self, board: &Board) -> usize {
        generate_moves(board, self.current_mut())
    }
}

/// Two-step knight leaps, each as an orthogonal step then a diagonal one.
const KNIGHT_STEPS: [(Direction, Direction); 8] = [
    (Direction::North, Direction::NorthEast),
    (Direction::North, Direction::NorthWest),
    (Direction::South, Direction::SouthEast),
    (Direction::South, Direction::SouthWest),
    (Direction::East, Direction::NorthEast),
    (Direction::East, Direction::SouthEast),
    (Direction::West, Direction::NorthWest),
    (Direction::West, Direction::SouthWest),
];

/// Fills `moves` with every pseudo-legal move for the side to move and
/// returns how many there are.
pub fn generate_moves(board: &Board, moves: &mut MoveList) -> usize {
    moves.clear();
    let us = board.side_to_move();

    generate_castling_moves(board, us, moves);

    for from in board.color_bb(us) {
        let piece = board.piece_at(from);
        match piece.piece_type() {
            PieceType::Pawn => generate_pawn_moves(board, from, piece, moves),
            PieceType::Knight => generate_knight_moves(board, from, piece, moves),
            PieceType::Bishop => {
                generate_slider_moves(board, from, piece, &Direction::DIAGONAL, false, moves)
            }
            PieceType::Rook => {
                generate_slider_moves(board, from, piece, &Direction::ORTHOGONAL, false, moves)
            }
            PieceType::Queen => {
                generate_slider_moves(board, from, piece, &Direction::QUEEN, false, moves)
            }
            PieceType::King => {
                generate_slider_moves(board, from, piece, &Direction::QUEEN, true, moves)
            }
            PieceType::None => {}
        }
    }

    moves.len()
}

/// Pushes a pawn move, expanding it into four promotions on the last rank.
fn push_pawn_move(
    moves: &mut MoveList,
    from: Square,
    to: Square,
    pawn: Piece,
    captured: Piece,
    move_type: MoveType,
) {
    if to.rank() == Rank::R8.relative(pawn.color()) {
        let capture = move_type.is_capture();
        for piece_type in PieceType::PROMOTIONS {
            if let Some(promotion) = MoveType::promotion(piece_type, capture) {
                moves.push(from, to, pawn, captured, promotion);
            }
        }
    } else {
        moves.push(from, to, pawn, captured, move_type);
    }
}

fn generate_pawn_moves(board: &Board, from: Square, pawn: Piece, moves: &mut MoveList) {
    let us = pawn.color();
    let (push, captures) = match us {
        Color::White => (Direction::North, [Direction::NorthEast, Direction::NorthWest]),
        Color::Black => (Direction::South, [Direction::SouthEast, Direction::SouthWest]),
    };

    if is_square(from, push) {
        let one = from.offset_unchecked(push.offset());
        if board.piece_at(one).is_none() {
            push_pawn_move(moves, from, one, pawn, Piece::None, MoveType::Quiet);

            if from.rank() == us.pawn_rank() {
                let two = one.offset_unchecked(push.offset());
                if board.piece_at(two).is_none() {
                    moves.push(from, two, pawn, Piece::None, MoveType::DoublePawnPush);
                }
            }
        }
    }

    for dir in captures {
        if !is_square(from, dir) {
            continue;
        }
        let to = from.offset_unchecked(dir.offset());
        let target = board.piece_at(to);
        if target.is_some() {
            if target.color() != us {
                push_pawn_move(moves, from, to, pawn, target, MoveType::Capture);
            }
        } else if board.en_passant() == Some(to) && to.rank() == Rank::R6.relative(us) {
            let victim = Piece::new(PieceType::Pawn, us.opposite());
            if board.piece_at(to.offset_unchecked(us.backward())) == victim {
                moves.push(from, to, pawn, victim, MoveType::EnPassant);
            }
        }
    }
}

fn generate_knight_moves(board: &Board, from: Square, knight: Piece, moves: &mut MoveList) {
    for (first, second) in KNIGHT_STEPS {
        if !is_square(from, first) {
            continue;
        }
        let middle = from.offset_unchecked(first.offset());
        if !is_square(middle, second) {
            continue;
        }
        let to = middle.offset_unchecked(second.offset());
        let target = board.piece_at(to);
        if target.is_none() {
            moves.push(from, to, knight, Piece::None, MoveType::Quiet);
        } else if target.color() != knight.color() {
            moves.push(from, to, knight, target, MoveType::Capture);
        }
    }
}

/// Walks each direction until the edge, a friendly piece, or a capture.
/// The king takes a single step.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    single_step: bool,
    moves: &mut MoveList,
) {
    for &dir in directions {
        let mut to = from;
        while is_square(to, dir) {
            to = to.offset_unchecked(dir.offset());
            let target = board.piece_at(to);
            if target.is_some() {
                if target.color() != piece.color() {
                    moves.push(from, to, piece, target, MoveType::Capture);
                }
                break;
            }
            moves.push(from, to, piece, Piece::None, MoveType::Quiet);
            if single_step {
                break;
            }
        }
    }
}

/// Castling is generated only when the right is held, king and rook stand
/// on their home squares, the squares between them are empty, and the king
/// does not start on, cross or land on an attacked square.
fn generate_castling_moves(board: &Board, us: Color, moves: &mut MoveList) {
    let rights = board.castling_rights();
    let them = us.opposite();
    let king = Piece::new(PieceType::King, us);
    let rook = Piece::new(PieceType::Rook, us);
    let king_start = Square::E1.relative(us);

    if board.piece_at(king_start) != king {
        return;
    }
    let empty = |squares: &[Square]| squares.iter().all(|&sq| board.piece_at(sq).is_none());
    let safe = |squares: &[Square]| squares.iter().all(|&sq| !board.is_attacked(sq, them));

    if rights.can_castle_kingside(us) && board.piece_at(Square::H1.relative(us)) == rook {
        let f = Square::F1.relative(us);
        let g = Square::G1.relative(us);
        if empty(&[f, g]) && safe(&[king_start, f, g]) {
            moves.push(king_start, g, king, Piece::None, MoveType::KingSideCastle);
        }
    }

    if rights.can_castle_queenside(us) && board.piece_at(Square::A1.relative(us)) == rook {
        let b = Square::B1.relative(us);
        let c = Square::C1.relative(us);
        let d = Square::D1.relative(us);
        if empty(&[b, c, d]) && safe(&[king_start, d, c]) {
            moves.push(king_start, c, king, Piece::None, MoveType::QueenSideCastle);
        }
    }
}
