//! One game in progress at the terminal.

use std::thread;
use std::time::Duration;

use parlor_core::{Game, Outcome, ParlorError, Result, Side};
use rand::Rng;

/// Something the engine did after the human's move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EngineEvent<A> {
    Moved(A),
    /// `Side` had no legal move and passed.
    Passed(Side),
}

/// A game driven by the human, with engine replies paced by `delay`.
pub struct Session<G: Game, R: Rng> {
    game: G,
    state: G::State,
    rng: R,
    delay: Duration,
}

impl<G: Game, R: Rng> Session<G, R> {
    pub fn new(game: G, mut rng: R, delay: Duration) -> Self {
        let state = game.new_game(&mut rng);
        tracing::info!(game = game.name(), "new game");
        Self {
            game,
            state,
            rng,
            delay,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.game.is_terminal(&self.state)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.game.outcome(&self.state)
    }

    /// Parse, check and play the human's move.
    ///
    /// The state is untouched when an error is returned.
    pub fn play_human(&mut self, input: &str) -> Result<G::Action> {
        if self.is_over() {
            return Err(ParlorError::GameOver);
        }
        let to_move = self.game.side_to_move(&self.state);
        if to_move != Side::Player {
            return Err(ParlorError::NotYourTurn(Side::Player));
        }
        let action = self.game.parse_action(&self.state, input)?;
        self.game.validate(&self.state, action)?;
        self.state = self.game.apply(&self.state, action);
        tracing::debug!(game = self.game.name(), %action, "human move");
        Ok(action)
    }

    /// True when the human has to wait: the engine is to move, or the human
    /// has no legal move and must pass.
    pub fn engine_pending(&self) -> bool {
        !self.is_over()
            && (self.game.side_to_move(&self.state) == Side::Opponent
                || self.game.legal_actions(&self.state).is_empty())
    }

    /// Let the engine play until the human is to move or the game ends.
    ///
    /// Each engine action is preceded by the pacing delay.
    pub fn engine_reply(&mut self) -> Vec<EngineEvent<G::Action>> {
        let mut events = Vec::new();
        while self.engine_pending() {
            let mover = self.game.side_to_move(&self.state);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            let (next, action) = self.game.engine_turn(&self.state, &mut self.rng);
            match action {
                Some(action) => {
                    tracing::debug!(game = self.game.name(), %action, "engine move");
                    events.push(EngineEvent::Moved(action));
                }
                None => {
                    // No progress means the engine cannot act here.
                    if self.game.side_to_move(&next) == mover && !self.game.is_terminal(&next) {
                        break;
                    }
                    events.push(EngineEvent::Passed(mover));
                }
            }
            self.state = next;
        }
        if let Some(outcome) = self.outcome() {
            tracing::info!(game = self.game.name(), %outcome, "game over");
        }
        events
    }
}
