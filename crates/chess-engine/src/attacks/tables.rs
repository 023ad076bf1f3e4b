//! Empty-board attack tables.
//!
//! Ray tables hold, per direction and square, every square a slider reaches
//! on an empty board. Each table is filled by walking from a corner: the
//! corner's ray is shifted one step at a time along two orthogonal walk
//! directions, and each shift is the ray of the next square. Leaper tables
//! are composed from single-step shifts.

use crate::Bitboard;
use chess_core::{Color, Direction, Square};
use std::sync::OnceLock;

/// Stores all precomputed attack tables.
pub struct AttackTables {
    rays: [[Bitboard; 64]; 8],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
}

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Gets the global attack tables, initializing if necessary.
#[inline]
pub fn tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(AttackTables::new)
}

/// Corner to start from, outer walk and inner walk, per direction index.
///
/// Both walks move toward or across the ray, never against it, so a shifted
/// ray only ever loses squares.
const RAY_WALKS: [(Square, Direction, Direction); 8] = [
    (Square::A1, Direction::East, Direction::North),
    (Square::A8, Direction::East, Direction::South),
    (Square::A1, Direction::North, Direction::East),
    (Square::H1, Direction::North, Direction::West),
    (Square::A1, Direction::East, Direction::North),
    (Square::H1, Direction::West, Direction::North),
    (Square::A8, Direction::East, Direction::South),
    (Square::H8, Direction::West, Direction::South),
];

impl AttackTables {
    /// Creates and initializes all attack tables.
    pub fn new() -> Self {
        let rays = std::array::from_fn(|i| {
            let dir = Direction::ALL[i];
            let (corner, outer, inner) = RAY_WALKS[i];
            ray_table(dir, corner, outer, inner)
        });

        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        for sq in Square::all() {
            let i = sq.index() as usize;
            let bb = Bitboard::from_square(sq);
            knight[i] = knight_pattern(bb);
            king[i] = king_pattern(bb);
            pawn[Color::White.index()][i] = bb.north().east() | bb.north().west();
            pawn[Color::Black.index()][i] = bb.south().east() | bb.south().west();
        }

        AttackTables {
            rays,
            knight,
            king,
            pawn,
        }
    }

    /// Empty-board ray from `sq` toward `dir`, excluding `sq`.
    #[inline]
    pub fn ray(&self, dir: Direction, sq: Square) -> Bitboard {
        self.rays[dir.index()][sq.index() as usize]
    }

    #[inline]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.index() as usize]
    }

    #[inline]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.index() as usize]
    }

    /// Squares a pawn of `color` on `sq` captures on.
    #[inline]
    pub fn pawn(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index() as usize]
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

fn slide(sq: Square, dir: Direction) -> Bitboard {
    let mut ray = Bitboard::EMPTY;
    let mut step = Bitboard::from_square(sq).shift(dir);
    while step.is_not_empty() {
        ray |= step;
        step = step.shift(dir);
    }
    ray
}

fn ray_table(dir: Direction, corner: Square, outer: Direction, inner: Direction) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut row_ray = slide(corner, dir);
    let mut row_origin = Bitboard::from_square(corner);
    for _ in 0..8 {
        let mut ray = row_ray;
        let mut origin = row_origin;
        for _ in 0..8 {
            table[origin.first_square().index() as usize] = ray;
            ray = ray.shift(inner);
            origin = origin.shift(inner);
        }
        row_ray = row_ray.shift(outer);
        row_origin = row_origin.shift(outer);
    }
    table
}

fn knight_pattern(bb: Bitboard) -> Bitboard {
    let sideways = bb.east().east() | bb.west().west();
    let upright = bb.north().north() | bb.south().south();
    sideways.north() | sideways.south() | upright.east() | upright.west()
}

fn king_pattern(bb: Bitboard) -> Bitboard {
    let row = bb.east() | bb | bb.west();
    (row.north() | row | row.south()) & !bb
}
