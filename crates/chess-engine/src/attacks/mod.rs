//! Attack queries.
//!
//! Leapers are a table lookup. Sliders resolve each ray against the
//! occupancy: the nearest blocker is found with a forward bit scan on
//! positive rays (north, east, north-east, north-west) and a reverse scan
//! on negative ones, and the blocker's own empty-board ray is removed. The
//! blocker square stays in the attack set.

mod tables;

pub use tables::{tables, AttackTables};

use crate::Bitboard;
use chess_core::{Color, Direction, Square};

/// A piece class or line pattern to compute attacks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attacker {
    Pawn(Color),
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Rank,
    File,
    Diagonal,
    AntiDiagonal,
}

/// Attacks of `attacker` standing on `sq` with the given occupancy.
///
/// Leapers ignore `occupied`.
pub fn attacks_for(attacker: Attacker, sq: Square, occupied: Bitboard) -> Bitboard {
    match attacker {
        Attacker::Pawn(color) => pawn_attacks(color, sq),
        Attacker::Knight => knight_attacks(sq),
        Attacker::Bishop => bishop_attacks(sq, occupied),
        Attacker::Rook => rook_attacks(sq, occupied),
        Attacker::Queen => queen_attacks(sq, occupied),
        Attacker::King => king_attacks(sq),
        Attacker::Rank => rank_attacks(sq, occupied),
        Attacker::File => file_attacks(sq, occupied),
        Attacker::Diagonal => diagonal_attacks(sq, occupied),
        Attacker::AntiDiagonal => anti_diagonal_attacks(sq, occupied),
    }
}

/// Ray attacks toward a positive direction (N, E, NE, NW).
#[inline]
pub fn positive_ray_attacks(sq: Square, occupied: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.is_positive());
    let t = tables();
    let mut attacks = t.ray(dir, sq);
    let blockers = attacks & occupied;
    if blockers.is_not_empty() {
        attacks ^= t.ray(dir, blockers.first_square());
    }
    attacks
}

/// Ray attacks toward a negative direction (S, W, SE, SW).
#[inline]
pub fn negative_ray_attacks(sq: Square, occupied: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(!dir.is_positive());
    let t = tables();
    let mut attacks = t.ray(dir, sq);
    let blockers = attacks & occupied;
    if blockers.is_not_empty() {
        attacks ^= t.ray(dir, blockers.last_square());
    }
    attacks
}

#[inline]
pub fn rank_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupied, Direction::East)
        | negative_ray_attacks(sq, occupied, Direction::West)
}

#[inline]
pub fn file_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupied, Direction::North)
        | negative_ray_attacks(sq, occupied, Direction::South)
}

/// The a1-h8 direction.
#[inline]
pub fn diagonal_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupied, Direction::NorthEast)
        | negative_ray_attacks(sq, occupied, Direction::SouthWest)
}

/// The h1-a8 direction.
#[inline]
pub fn anti_diagonal_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupied, Direction::NorthWest)
        | negative_ray_attacks(sq, occupied, Direction::SouthEast)
}

/// Returns rook attacks for a square given occupied squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rank_attacks(sq, occupied) | file_attacks(sq, occupied)
}

/// Returns bishop attacks for a square given occupied squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    diagonal_attacks(sq, occupied) | anti_diagonal_attacks(sq, occupied)
}

/// Returns queen attacks (bishop + rook).
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables().knight(sq)
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables().king(sq)
}

/// Squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables().pawn(color, sq)
}
