//! Implementation of the parlor Game trait for tic-tac-toe.

use parlor_core::{Game, Outcome, ParlorError, Result, Side};
use rand::Rng;

use crate::{select_opponent_move, EngineConfig, TicTacToeMove, TicTacToeState};

/// Carry-limit tic-tac-toe against the minimax opponent.
#[derive(Clone, Debug, Default)]
pub struct TicTacToe {
    config: EngineConfig,
}

impl TicTacToe {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = TicTacToeMove;

    fn name(&self) -> &'static str {
        "tic-tac-toe"
    }

    fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> TicTacToeState {
        TicTacToeState::new_game(rng, self.config.move_limit)
    }

    fn side_to_move(&self, state: &TicTacToeState) -> Side {
        state.turn()
    }

    fn legal_actions(&self, state: &TicTacToeState) -> Vec<TicTacToeMove> {
        state.legal_moves()
    }

    fn validate(&self, state: &TicTacToeState, action: TicTacToeMove) -> Result<()> {
        state.check_move(action)
    }

    fn apply(&self, state: &TicTacToeState, action: TicTacToeMove) -> TicTacToeState {
        state.apply_move(action)
    }

    fn is_terminal(&self, state: &TicTacToeState) -> bool {
        state.is_game_over()
    }

    fn outcome(&self, state: &TicTacToeState) -> Option<Outcome> {
        state.outcome()
    }

    fn engine_turn<R: Rng + ?Sized>(
        &self,
        state: &TicTacToeState,
        rng: &mut R,
    ) -> (TicTacToeState, Option<TicTacToeMove>) {
        match select_opponent_move(state, &self.config, rng) {
            Some(mv) => (state.apply_move(mv), Some(mv)),
            None => (*state, None),
        }
    }

    /// Humans place marks only: a single cell number 0-8.
    fn parse_action(&self, _state: &TicTacToeState, input: &str) -> Result<TicTacToeMove> {
        let cell: u8 = input
            .trim()
            .parse()
            .map_err(|_| ParlorError::Parse(format!("expected a cell number 0-8, got {:?}", input.trim())))?;
        if cell as usize >= crate::state::CELLS {
            return Err(ParlorError::InvalidCell(cell as usize));
        }
        Ok(TicTacToeMove::Place(cell))
    }
}
