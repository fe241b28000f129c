use thiserror::Error;

/// Errors reported by the parlor game engines.
///
/// The engines themselves treat illegal moves as no-ops; these variants are
/// returned by the `check_*` helpers for callers that want the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParlorError {
    #[error("Cell {0} is off the board")]
    InvalidCell(usize),

    #[error("Cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("It is not {0}'s turn")]
    NotYourTurn(crate::Side),

    #[error("The game is already over")]
    GameOver,

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Invalid board diagram: {0}")]
    InvalidBoard(String),

    #[error("Could not parse move: {0}")]
    Parse(String),
}

/// Convenience Result type for parlor operations
pub type Result<T> = std::result::Result<T, ParlorError>;
