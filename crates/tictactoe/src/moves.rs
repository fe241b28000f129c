use std::fmt;

/// A tic-tac-toe move for the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TicTacToeMove {
    /// Put a new mark on an empty cell (evicting the oldest one at the cap).
    Place(u8),
    /// Lift an existing mark and put it on an empty cell.
    Relocate { from: u8, to: u8 },
}

impl TicTacToeMove {
    /// The cell that ends up holding the mover's mark.
    pub fn target(self) -> u8 {
        match self {
            TicTacToeMove::Place(cell) => cell,
            TicTacToeMove::Relocate { to, .. } => to,
        }
    }

    pub fn is_relocation(self) -> bool {
        matches!(self, TicTacToeMove::Relocate { .. })
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicTacToeMove::Place(cell) => write!(f, "{}", cell),
            TicTacToeMove::Relocate { from, to } => write!(f, "{}->{}", from, to),
        }
    }
}
