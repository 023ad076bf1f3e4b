//! Compass directions on the board.
//!
//! Two related but distinct types live here:
//! - [`Direction`] is an *index* 0-7, used to select per-direction tables.
//! - [`Offset`] is a signed *square delta* (e.g. +8 for one rank north).
//!
//! Conversions between them are explicit: [`Direction::offset`] and
//! [`Offset::direction`].

use std::fmt;

/// One of the eight compass directions, as a table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
    NorthEast = 4,
    NorthWest = 5,
    SouthEast = 6,
    SouthWest = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Queen and king directions: orthogonal first, then diagonal.
    pub const QUEEN: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Returns the table index (0-7).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the signed square delta of one step in this direction.
    #[inline]
    pub const fn offset(self) -> Offset {
        match self {
            Direction::North => Offset::NORTH,
            Direction::South => Offset::SOUTH,
            Direction::East => Offset::EAST,
            Direction::West => Offset::WEST,
            Direction::NorthEast => Offset::NORTH_EAST,
            Direction::NorthWest => Offset::NORTH_WEST,
            Direction::SouthEast => Offset::SOUTH_EAST,
            Direction::SouthWest => Offset::SOUTH_WEST,
        }
    }

    /// True if stepping this way increases the square index.
    ///
    /// Positive rays find their nearest blocker with a forward bit scan,
    /// negative rays with a reverse scan.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.offset().delta() > 0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "north-east",
            Direction::NorthWest => "north-west",
            Direction::SouthEast => "south-east",
            Direction::SouthWest => "south-west",
        };
        f.write_str(name)
    }
}

/// A signed square delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset(i8);

impl Offset {
    pub const NORTH: Offset = Offset(8);
    pub const SOUTH: Offset = Offset(-8);
    pub const EAST: Offset = Offset(1);
    pub const WEST: Offset = Offset(-1);
    pub const NORTH_EAST: Offset = Offset(9);
    pub const NORTH_WEST: Offset = Offset(7);
    pub const SOUTH_EAST: Offset = Offset(-7);
    pub const SOUTH_WEST: Offset = Offset(-9);

    /// Returns the raw delta.
    #[inline]
    pub const fn delta(self) -> i8 {
        self.0
    }

    /// Returns the compass direction this delta is a single step of, if any.
    pub const fn direction(self) -> Option<Direction> {
        match self.0 {
            8 => Some(Direction::North),
            -8 => Some(Direction::South),
            1 => Some(Direction::East),
            -1 => Some(Direction::West),
            9 => Some(Direction::NorthEast),
            7 => Some(Direction::NorthWest),
            -7 => Some(Direction::SouthEast),
            -9 => Some(Direction::SouthWest),
            _ => None,
        }
    }
}

impl From<Direction> for Offset {
    #[inline]
    fn from(direction: Direction) -> Self {
        direction.offset()
    }
}
