//! Disc placement, legality and flipping on the 6×6 board.

use std::fmt;

use parlor_core::{ParlorError, Result, Side};

use crate::bitboard::Direction;
use crate::square::SIZE;
use crate::{Bitboard, Square};

/// Longest run of opposing discs that can be bracketed on a 6-wide board.
const MAX_RUN: usize = SIZE as usize - 2;

/// Disc colour. Black is the human player and moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Disc {
    Black,
    White,
}

impl Disc {
    /// Get the opposing colour.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Disc::Black => Disc::White,
            Disc::White => Disc::Black,
        }
    }

    /// Which participant plays this colour.
    #[inline]
    pub const fn side(self) -> Side {
        match self {
            Disc::Black => Side::Player,
            Disc::White => Side::Opponent,
        }
    }

    #[inline]
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::Player => Disc::Black,
            Side::Opponent => Disc::White,
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disc::Black => write!(f, "Black"),
            Disc::White => write!(f, "White"),
        }
    }
}

/// Disc positions for both colours.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Board {
    /// The standard opening cross:
    /// (2,2)=White, (2,3)=Black, (3,2)=Black, (3,3)=White.
    pub fn initial() -> Self {
        let mid = SIZE / 2;
        let at = |row, col| Square(row * SIZE + col).bitboard();
        Self {
            black: at(mid - 1, mid) | at(mid, mid - 1),
            white: at(mid - 1, mid - 1) | at(mid, mid),
        }
    }

    /// A board with no discs.
    pub fn empty() -> Self {
        Self {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        }
    }

    /// Parse a 6-line diagram of `.`, `B` and `W`, top row first.
    /// Whitespace inside a line is ignored.
    ///
    /// # Errors
    /// Returns `ParlorError::InvalidBoard` on a wrong shape or unknown character.
    pub fn from_ascii(diagram: &str) -> Result<Self> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != SIZE as usize {
            return Err(ParlorError::InvalidBoard(format!(
                "expected {} rows, found {}",
                SIZE,
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != SIZE as usize {
                return Err(ParlorError::InvalidBoard(format!(
                    "row {} has {} cells",
                    row,
                    cells.len()
                )));
            }
            for (col, c) in cells.into_iter().enumerate() {
                let sq = Square(row as u8 * SIZE + col as u8);
                match c {
                    '.' | '-' => {}
                    'B' | 'b' | 'X' | 'x' => board.black.set(sq),
                    'W' | 'w' | 'O' | 'o' => board.white.set(sq),
                    other => {
                        return Err(ParlorError::InvalidBoard(format!(
                            "unexpected character {:?} at ({}, {})",
                            other, row, col
                        )))
                    }
                }
            }
        }
        Ok(board)
    }

    /// Discs of one colour.
    #[inline]
    pub fn discs(&self, disc: Disc) -> Bitboard {
        match disc {
            Disc::Black => self.black,
            Disc::White => self.white,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Get the disc on a square, if any.
    pub fn get(&self, sq: Square) -> Option<Disc> {
        if self.black.contains(sq) {
            Some(Disc::Black)
        } else if self.white.contains(sq) {
            Some(Disc::White)
        } else {
            None
        }
    }

    #[inline]
    pub fn count(&self, disc: Disc) -> u32 {
        self.discs(disc).popcount()
    }

    /// Total number of discs on the board.
    #[inline]
    pub fn total(&self) -> u32 {
        self.occupied().popcount()
    }

    /// Every empty square where `disc` would bracket at least one opposing
    /// disc along some straight line.
    pub fn find_legal_moves(&self, disc: Disc) -> Bitboard {
        let own = self.discs(disc);
        let opp = self.discs(disc.opposite());
        let empty = self.empty_squares();

        let mut moves = Bitboard::EMPTY;
        for dir in Direction::ALL {
            // Grow runs of opposing discs outward from our own discs.
            let mut run = own.shift(dir) & opp;
            for _ in 1..MAX_RUN {
                run |= run.shift(dir) & opp;
            }
            moves |= run.shift(dir) & empty;
        }
        moves
    }

    pub fn has_legal_move(&self, disc: Disc) -> bool {
        self.find_legal_moves(disc).is_not_empty()
    }

    /// Opposing discs captured if `disc` is played on `sq`.
    ///
    /// Meant for squares known to be legal; an occupied square yields no flips.
    pub fn compute_flips(&self, sq: Square, disc: Disc) -> Bitboard {
        if self.occupied().contains(sq) {
            return Bitboard::EMPTY;
        }
        let own = self.discs(disc);
        let opp = self.discs(disc.opposite());

        let mut flips = Bitboard::EMPTY;
        for dir in Direction::ALL {
            let mut run = Bitboard::EMPTY;
            let mut cursor = sq.bitboard().shift(dir);
            while (cursor & opp).is_not_empty() {
                run |= cursor;
                cursor = cursor.shift(dir);
            }
            if (cursor & own).is_not_empty() {
                flips |= run;
            }
        }
        flips
    }

    /// Place `disc` on `sq` and flip the captured discs.
    ///
    /// Returns the board unchanged when the placement captures nothing.
    pub fn play(&self, sq: Square, disc: Disc) -> Board {
        let flips = self.compute_flips(sq, disc);
        if flips.is_empty() {
            return *self;
        }
        let mut next = *self;
        let placed = sq.bitboard() | flips;
        match disc {
            Disc::Black => {
                next.black |= placed;
                next.white ^= flips;
            }
            Disc::White => {
                next.white |= placed;
                next.black ^= flips;
            }
        }
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..SIZE {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        writeln!(f)?;
        for row in 0..SIZE {
            write!(f, "{} ", row + 1)?;
            for col in 0..SIZE {
                let c = match self.get(Square(row * SIZE + col)) {
                    Some(Disc::Black) => '●',
                    Some(Disc::White) => '○',
                    None => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
