//! Implementation of the parlor Game trait for Othello.

use parlor_core::{Game, Outcome, ParlorError, Result, Side};
use rand::Rng;

use crate::engine::engine_turn;
use crate::{EvalWeights, OthelloState, Square};

/// 6×6 Othello with the human on Black.
#[derive(Clone, Debug, Default)]
pub struct Othello {
    weights: EvalWeights,
}

impl Othello {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl Game for Othello {
    type State = OthelloState;
    type Action = Square;

    fn name(&self) -> &'static str {
        "othello"
    }

    fn new_game<R: Rng + ?Sized>(&self, _rng: &mut R) -> OthelloState {
        OthelloState::new()
    }

    fn side_to_move(&self, state: &OthelloState) -> Side {
        state.current_player().side()
    }

    fn legal_actions(&self, state: &OthelloState) -> Vec<Square> {
        state.legal_moves()
    }

    fn validate(&self, state: &OthelloState, action: Square) -> Result<()> {
        state.check_move(action)
    }

    fn apply(&self, state: &OthelloState, action: Square) -> OthelloState {
        state.apply_move(action)
    }

    fn is_terminal(&self, state: &OthelloState) -> bool {
        state.is_game_over()
    }

    fn outcome(&self, state: &OthelloState) -> Option<Outcome> {
        state.outcome()
    }

    fn engine_turn<R: Rng + ?Sized>(
        &self,
        state: &OthelloState,
        rng: &mut R,
    ) -> (OthelloState, Option<Square>) {
        engine_turn(state, &self.weights, rng)
    }

    /// Accepts `c2` style squares or zero-based `row col` pairs.
    fn parse_action(&self, _state: &OthelloState, input: &str) -> Result<Square> {
        Square::parse(input).ok_or_else(|| {
            ParlorError::Parse(format!(
                "expected a square like c2 or \"1 2\", got {:?}",
                input.trim()
            ))
        })
    }
}
