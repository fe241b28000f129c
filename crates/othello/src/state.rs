//! Turn order, forced passes and game end.

use std::fmt;

use parlor_core::{Outcome, ParlorError, Result};

use crate::{Bitboard, Board, Disc, Square};

/// A position plus whose turn it is.
///
/// Disc counts are always derived from the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct OthelloState {
    board: Board,
    current: Disc,
    game_over: bool,
    skip_turn: bool,
}

impl OthelloState {
    /// The standard opening with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            current: Disc::Black,
            game_over: false,
            skip_turn: false,
        }
    }

    /// Wrap an arbitrary position. The game is over if neither side can move.
    pub fn from_board(board: Board, current: Disc) -> Self {
        let game_over = !board.has_legal_move(Disc::Black) && !board.has_legal_move(Disc::White);
        Self {
            board,
            current,
            game_over,
            skip_turn: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Disc {
        self.current
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True when the side that would have moved next was forced to pass.
    #[inline]
    pub fn skip_turn(&self) -> bool {
        self.skip_turn
    }

    #[inline]
    pub fn black_count(&self) -> u32 {
        self.board.count(Disc::Black)
    }

    #[inline]
    pub fn white_count(&self) -> u32 {
        self.board.count(Disc::White)
    }

    /// Legal squares for the side to move, empty once the game is over.
    pub fn legal_moves_bitboard(&self) -> Bitboard {
        if self.game_over {
            Bitboard::EMPTY
        } else {
            self.board.find_legal_moves(self.current)
        }
    }

    /// Legal squares for the side to move, in index order.
    pub fn legal_moves(&self) -> Vec<Square> {
        self.legal_moves_bitboard().iter().collect()
    }

    pub fn is_legal(&self, sq: Square) -> bool {
        self.legal_moves_bitboard().contains(sq)
    }

    /// Explain why `sq` cannot be played by the side to move.
    pub fn check_move(&self, sq: Square) -> Result<()> {
        if self.game_over {
            return Err(ParlorError::GameOver);
        }
        if self.board.get(sq).is_some() {
            return Err(ParlorError::CellOccupied(sq.index()));
        }
        if !self.board.find_legal_moves(self.current).contains(sq) {
            return Err(ParlorError::IllegalMove(format!(
                "{} at {} captures no discs",
                self.current, sq
            )));
        }
        Ok(())
    }

    /// Play `sq` for the side to move.
    ///
    /// Returns the state unchanged when the move is illegal. After a legal
    /// move the turn passes to the other colour if it can move; otherwise the
    /// mover keeps the turn and `skip_turn` is set; if neither side can move
    /// the game ends.
    pub fn apply_move(&self, sq: Square) -> Self {
        if self.check_move(sq).is_err() {
            return *self;
        }
        let board = self.board.play(sq, self.current);
        Self {
            board,
            ..*self
        }
        .hand_over(self.current.opposite())
    }

    /// Settle a turn where the side to move has no legal move.
    ///
    /// Does nothing if the side to move can play or the game is already over.
    pub fn resolve_pass(&self) -> Self {
        if self.game_over || self.board.has_legal_move(self.current) {
            return *self;
        }
        let other = self.current.opposite();
        if self.board.has_legal_move(other) {
            tracing::debug!(passed = %self.current, "forced pass");
            Self {
                current: other,
                skip_turn: true,
                ..*self
            }
        } else {
            Self {
                game_over: true,
                skip_turn: false,
                ..*self
            }
        }
    }

    /// Give the turn to `next` if it can move, else back to its opponent,
    /// else end the game.
    fn hand_over(self, next: Disc) -> Self {
        if self.board.has_legal_move(next) {
            Self {
                current: next,
                skip_turn: false,
                ..self
            }
        } else if self.board.has_legal_move(next.opposite()) {
            Self {
                current: next.opposite(),
                skip_turn: true,
                ..self
            }
        } else {
            tracing::debug!(
                black = self.black_count(),
                white = self.white_count(),
                "othello game over"
            );
            Self {
                game_over: true,
                skip_turn: false,
                ..self
            }
        }
    }

    /// Colour with more discs at the end, `None` while in progress or on a tie.
    pub fn winner(&self) -> Option<Disc> {
        match self.outcome()? {
            Outcome::Won(side) => Some(Disc::from_side(side)),
            Outcome::Draw => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.game_over {
            return None;
        }
        let (black, white) = (self.black_count(), self.white_count());
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Won(Disc::Black.side()),
            std::cmp::Ordering::Less => Outcome::Won(Disc::White.side()),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

impl Default for OthelloState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OthelloState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        write!(
            f,
            "● Black {}  ○ White {}",
            self.black_count(),
            self.white_count()
        )?;
        if self.game_over {
            write!(f, "  (game over)")
        } else {
            write!(f, "  ({} to move)", self.current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::Side;

    fn sq(row: u8, col: u8) -> Square {
        Square::from_coords(row, col).unwrap()
    }

    #[test]
    fn test_new_state() {
        let state = OthelloState::new();
        assert_eq!(state.current_player(), Disc::Black);
        assert_eq!(state.black_count(), 2);
        assert_eq!(state.white_count(), 2);
        assert!(!state.is_game_over());
        assert!(!state.skip_turn());
        assert_eq!(state.legal_moves().len(), 4);
    }

    #[test]
    fn test_apply_move_passes_turn() {
        let state = OthelloState::new().apply_move(sq(1, 2));
        assert_eq!(state.current_player(), Disc::White);
        assert_eq!(state.black_count(), 4);
        assert_eq!(state.white_count(), 1);
        assert!(!state.skip_turn());
    }

    #[test]
    fn test_check_move_reasons() {
        let state = OthelloState::new();
        assert_eq!(state.check_move(sq(2, 2)), Err(ParlorError::CellOccupied(14)));
        assert!(matches!(state.check_move(sq(1, 3)), Err(ParlorError::IllegalMove(_))));
        assert!(state.check_move(sq(1, 2)).is_ok());
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let state = OthelloState::new();
        assert_eq!(state.apply_move(sq(0, 0)), state);
        assert_eq!(state.apply_move(sq(3, 3)), state);
    }

    #[test]
    fn test_skip_turn_after_move() {
        let board = Board::from_ascii(
            "
            . B W . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . B W
            ",
        )
        .unwrap();
        let state = OthelloState::from_board(board, Disc::White);
        assert!(!state.is_game_over());

        // Taking (0,0) leaves Black's only disc pinned against the edge.
        let next = state.apply_move(sq(0, 0));
        assert_eq!(next.current_player(), Disc::White);
        assert!(next.skip_turn());
        assert_eq!(next.white_count(), 4);
        assert_eq!(next.black_count(), 1);
        assert_eq!(next.legal_moves(), vec![sq(5, 3)]);

        let last = next.apply_move(sq(5, 3));
        assert!(last.is_game_over());
        assert!(!last.skip_turn());
        assert_eq!(last.black_count(), 0);
        assert_eq!(last.outcome(), Some(Outcome::Won(Side::Opponent)));

        // Game over freezes the board.
        assert_eq!(last.apply_move(sq(1, 1)), last);
        assert_eq!(last.resolve_pass(), last);
    }

    #[test]
    fn test_game_over_when_nobody_moves() {
        let board = Board::from_ascii(
            "
            B B . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . W
            ",
        )
        .unwrap();
        let state = OthelloState::from_board(board, Disc::Black);
        assert!(state.is_game_over());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.check_move(sq(0, 2)), Err(ParlorError::GameOver));
        assert_eq!(state.outcome(), Some(Outcome::Won(Side::Player)));
        assert_eq!(state.winner(), Some(Disc::Black));
    }

    #[test]
    fn test_resolve_pass() {
        // Black to move but only White can play.
        let board = Board::from_ascii(
            "
            W B . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            ",
        )
        .unwrap();
        let state = OthelloState::from_board(board, Disc::Black);
        assert!(state.legal_moves().is_empty());

        let passed = state.resolve_pass();
        assert_eq!(passed.current_player(), Disc::White);
        assert!(passed.skip_turn());
        assert_eq!(passed.legal_moves(), vec![sq(0, 2)]);

        // Nothing to resolve when the side to move can play.
        assert_eq!(passed.resolve_pass(), passed);
    }

    #[test]
    fn test_tie_is_draw() {
        let board = Board::from_ascii(
            "
            B . . . . W
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            . . . . . .
            ",
        )
        .unwrap();
        let state = OthelloState::from_board(board, Disc::White);
        assert_eq!(state.outcome(), Some(Outcome::Draw));
        assert_eq!(state.winner(), None);
    }
}
