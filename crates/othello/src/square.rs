use std::fmt;

use crate::Bitboard;

/// Board width and height.
pub const SIZE: u8 = 6;

/// Number of squares on the board.
pub const NUM_SQUARES: u8 = SIZE * SIZE;

/// An Othello square (0-35) using row-major ordering from the top-left.
/// (0,0)=0, (0,5)=5, (1,0)=6, ..., (5,5)=35
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const TOP_LEFT: Square = Square(0);
    pub const TOP_RIGHT: Square = Square(5);
    pub const BOTTOM_LEFT: Square = Square(30);
    pub const BOTTOM_RIGHT: Square = Square(35);

    /// The four corners.
    pub const CORNERS: [Square; 4] = [
        Self::TOP_LEFT,
        Self::TOP_RIGHT,
        Self::BOTTOM_LEFT,
        Self::BOTTOM_RIGHT,
    ];

    /// Creates a square from row (0-5, top to bottom) and column (0-5, left to right)
    #[inline]
    pub const fn from_coords(row: u8, col: u8) -> Option<Self> {
        if row < SIZE && col < SIZE {
            Some(Square(row * SIZE + col))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / SIZE
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % SIZE
    }

    /// Returns the raw index (0-35)
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns a bitboard with just this square set
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Parse a square typed by a human.
    ///
    /// Accepts algebraic notation (`"c2"`: column letter a-f, row 1-6 from
    /// the top) or zero-based `"row col"` / `"row,col"` pairs.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() == 2 && bytes[0].is_ascii_alphabetic() {
            let col = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
            let row = bytes[1].wrapping_sub(b'1');
            return Self::from_coords(row, col);
        }

        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::from_coords(row, col)
    }

    /// Iterator over all 36 squares
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }
}
