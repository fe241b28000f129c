//! Player identities and game outcomes shared by both engines.

use std::fmt;

/// One of the two participants in a parlor game.
///
/// `Player` is always the human at the keyboard, `Opponent` is the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Get the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Index usable for per-side arrays (`Player = 0`, `Opponent = 1`).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Final result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    Won(Side),
    Draw,
}

impl Outcome {
    /// The winning side, if the game was not drawn.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Won(side) => Some(side),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Player.opposite(), Side::Opponent);
        assert_eq!(Side::Opponent.opposite(), Side::Player);
        assert_eq!(Side::Player.opposite().opposite(), Side::Player);
    }

    #[test]
    fn test_side_index() {
        assert_eq!(Side::Player.index(), 0);
        assert_eq!(Side::Opponent.index(), 1);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::Won(Side::Opponent).winner(), Some(Side::Opponent));
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Won(Side::Player).to_string(), "player wins");
        assert_eq!(Outcome::Draw.to_string(), "draw");
    }

    #[test]
    fn test_error_messages() {
        use crate::ParlorError;

        assert_eq!(
            ParlorError::CellOccupied(4).to_string(),
            "Cell 4 is already occupied"
        );
        assert_eq!(
            ParlorError::NotYourTurn(Side::Player).to_string(),
            "It is not player's turn"
        );
    }
}
