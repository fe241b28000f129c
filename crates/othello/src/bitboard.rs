use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::square::{Square, SIZE};

/// One of the 8 straight-line directions on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
}

/// A set of squares on the 6×6 board, one bit per square (bit 0 = top-left).
/// Only the low 36 bits are ever set.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no squares set)
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Every square of the board
    pub const ALL: Bitboard = Bitboard(0xF_FFFF_FFFF);

    /// Leftmost column
    pub const COL_A: Bitboard = Bitboard(0x0_4104_1041);

    /// Rightmost column
    pub const COL_F: Bitboard = Bitboard(0x8_2082_0820);

    /// Top row
    pub const ROW_1: Bitboard = Bitboard(0x0_0000_003F);

    /// Bottom row
    pub const ROW_6: Bitboard = Bitboard(0xF_C000_0000);

    /// The four corners
    pub const CORNERS: Bitboard = Bitboard(0x8_4000_0021);

    /// Returns true if no squares are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if any squares are set
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns true if the given square is set
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.0) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    /// Returns the number of set squares (population count)
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Pops and returns the least significant set bit, clearing it
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1; // Clear lowest bit
        Some(Square(sq))
    }

    /// Returns an iterator over all set squares, in index order
    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// Shift every square one step in `dir`, dropping squares that leave
    /// the board instead of wrapping to the next row.
    #[inline]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        let b = self.0;
        let all = Self::ALL.0;
        let not_a = !Self::COL_A.0;
        let not_f = !Self::COL_F.0;
        let w = SIZE as u32;
        Bitboard(match dir {
            Direction::North => b >> w,
            Direction::South => (b << w) & all,
            Direction::East => (b << 1) & not_a & all,
            Direction::West => (b >> 1) & not_f,
            Direction::NorthEast => (b >> (w - 1)) & not_a,
            Direction::NorthWest => (b >> (w + 1)) & not_f,
            Direction::SouthEast => (b << (w + 1)) & not_a & all,
            Direction::SouthWest => (b << (w - 1)) & not_f & all,
        })
    }
}

/// Iterator over the set squares in a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.popcount() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

// Bitwise operations
impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

/// Complement within the board (bits beyond square 35 stay clear).
impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:09X})", self.0)?;
        write!(f, "{}", self)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let sq = Square(row * SIZE + col);
                if self.contains(sq) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
