//! D8 flow direction codes.
//!
//! Codes follow the r.watershed layout, counter-clockwise from north-east:
//!
//! ```text
//! |3|2|1|
//! |4| |8|
//! |5|6|7|
//! ```
//!
//! Negative codes (flow leaving the computational region) decode to the same
//! direction as their absolute value. Zero, null and anything outside 1..=8
//! is "no flow".
use serde::{Deserialize, Serialize};

use crate::grid::NULL_CELL;

/// (drow, dcol) for codes 1..=8, indexed by `code - 1`.
pub const D8_OFFSETS: [(isize, isize); 8] = [
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
];

/// One of the eight D8 flow directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast = 1,
    North = 2,
    NorthWest = 3,
    West = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
    East = 8,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::East,
    ];

    /// Decode a raw direction cell. Returns `None` for no-flow values.
    #[inline]
    pub fn from_code(code: i32) -> Option<Direction> {
        if code == NULL_CELL {
            return None;
        }
        match code.unsigned_abs() {
            c @ 1..=8 => Some(Self::ALL[c as usize - 1]),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn offset(self) -> (isize, isize) {
        D8_OFFSETS[self as usize - 1]
    }

    /// The direction pointing back along this one.
    #[inline]
    pub fn opposite(self) -> Direction {
        let c = self as usize;
        let back = if c > 4 { c - 4 } else { c + 4 };
        Self::ALL[back - 1]
    }
}
