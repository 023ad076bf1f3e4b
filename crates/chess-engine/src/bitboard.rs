//! Bitboard representation and operations.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! chess board. This allows efficient parallel operations on multiple squares.

use chess_core::{Direction, Square};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::sync::OnceLock;

/// Population counts of every 16-bit value.
static POPCOUNT_16: OnceLock<Box<[u8]>> = OnceLock::new();

pub(crate) fn popcount_table() -> &'static [u8] {
    POPCOUNT_16.get_or_init(|| {
        let mut table = vec![0u8; 1 << 16];
        for i in 1..table.len() {
            table[i] = table[i >> 1] + (i & 1) as u8;
        }
        table.into_boxed_slice()
    })
}

const DEBRUIJN_64: u64 = 0x03f7_9d71_b4cb_0a89;

#[rustfmt::skip]
const INDEX_64: [u8; 64] = [
     0, 47,  1, 56, 48, 27,  2, 60,
    57, 49, 41, 37, 28, 16,  3, 61,
    54, 58, 35, 52, 50, 42, 21, 44,
    38, 32, 29, 23, 17, 11,  4, 62,
    46, 55, 26, 59, 40, 36, 15, 53,
    34, 51, 20, 43, 31, 22, 10, 45,
    25, 39, 14, 33, 19, 30,  9, 24,
    13, 18,  8, 12,  7,  6,  5, 63,
];

/// Counts set bits with four lookups into a 16-bit table.
#[inline]
pub fn pop_count(bb: u64) -> u32 {
    let table = popcount_table();
    (table[(bb & 0xffff) as usize]
        + table[((bb >> 16) & 0xffff) as usize]
        + table[((bb >> 32) & 0xffff) as usize]
        + table[(bb >> 48) as usize]) as u32
}

/// Index of the lowest set bit. `bb` must be non-zero.
#[inline]
pub fn bit_scan_forward(mut bb: u64) -> u8 {
    debug_assert!(bb != 0, "bit scan of an empty bitboard");
    let mut index = 0u8;
    if bb & 0xffff_ffff == 0 {
        bb >>= 32;
        index += 32;
    }
    if bb & 0xffff == 0 {
        bb >>= 16;
        index += 16;
    }
    if bb & 0xff == 0 {
        bb >>= 8;
        index += 8;
    }
    if bb & 0xf == 0 {
        bb >>= 4;
        index += 4;
    }
    if bb & 0x3 == 0 {
        bb >>= 2;
        index += 2;
    }
    if bb & 0x1 == 0 {
        index += 1;
    }
    index
}

/// Index of the highest set bit. `bb` must be non-zero.
#[inline]
pub fn bit_scan_reverse(mut bb: u64) -> u8 {
    debug_assert!(bb != 0, "bit scan of an empty bitboard");
    bb |= bb >> 1;
    bb |= bb >> 2;
    bb |= bb >> 4;
    bb |= bb >> 8;
    bb |= bb >> 16;
    bb |= bb >> 32;
    INDEX_64[(bb.wrapping_mul(DEBRUIJN_64) >> 58) as usize]
}

/// Returns true if stepping from `sq` toward `dir` stays on the board.
#[inline]
pub fn is_square(sq: Square, dir: Direction) -> bool {
    Bitboard::from_square(sq).shift(dir).is_not_empty()
}

/// A 64-bit board representation.
///
/// Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (little-endian rank-file mapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all squares set).
    pub const FULL: Bitboard = Bitboard(!0);

    // File masks
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    // Rank masks
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Squares that may move one step in each direction, by direction index.
    const SHIFT_MASKS: [u64; 8] = [
        !Self::RANK_8.0,
        !Self::RANK_1.0,
        !Self::FILE_H.0,
        !Self::FILE_A.0,
        !(Self::RANK_8.0 | Self::FILE_H.0),
        !(Self::RANK_8.0 | Self::FILE_A.0),
        !(Self::RANK_1.0 | Self::FILE_H.0),
        !(Self::RANK_1.0 | Self::FILE_A.0),
    ];

    /// Creates a bitboard from a raw u64.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bit())
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the bitboard is not empty.
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub fn count(self) -> u32 {
        pop_count(self.0)
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & sq.bit()) != 0
    }

    /// Sets the given square.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= sq.bit();
    }

    /// Clears the given square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !sq.bit();
    }

    /// Lowest set square. The bitboard must be non-empty.
    #[inline]
    pub fn first_square(self) -> Square {
        Square::from_index_unchecked(bit_scan_forward(self.0))
    }

    /// Highest set square. The bitboard must be non-empty.
    #[inline]
    pub fn last_square(self) -> Square {
        Square::from_index_unchecked(bit_scan_reverse(self.0))
    }

    /// Pops and returns the least significant bit.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.first_square();
            self.0 &= self.0 - 1; // Clear the LSB
            Some(sq)
        }
    }

    /// Shifts every square one step toward `dir`. Squares that would leave
    /// the board are dropped before the shift, so nothing wraps.
    #[inline]
    pub fn shift(self, dir: Direction) -> Bitboard {
        let masked = self.0 & Self::SHIFT_MASKS[dir.index()];
        let delta = dir.offset().delta();
        if delta > 0 {
            Bitboard(masked << delta)
        } else {
            Bitboard(masked >> -delta)
        }
    }

    /// Shifts the bitboard north (toward rank 8).
    #[inline]
    pub const fn north(self) -> Bitboard {
        Bitboard((self.0 & !Self::RANK_8.0) << 8)
    }

    /// Shifts the bitboard south (toward rank 1).
    #[inline]
    pub const fn south(self) -> Bitboard {
        Bitboard((self.0 & !Self::RANK_1.0) >> 8)
    }

    /// Shifts the bitboard east (toward file H).
    #[inline]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 & !Self::FILE_H.0) << 1)
    }

    /// Shifts the bitboard west (toward file A).
    #[inline]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 & !Self::FILE_A.0) >> 1)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#018x})", self.0)?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = rank * 8 + file;
                if (self.0 >> sq) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over set squares in a bitboard, lowest square first.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}
