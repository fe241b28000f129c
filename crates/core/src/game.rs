use std::fmt;
use std::hash::Hash;

use rand::Rng;

use crate::{Outcome, Result, Side};

/// A two-player parlor game played by a human against a scripted opponent.
///
/// This trait is what the terminal shell and the benchmark drive. Each engine
/// keeps its own richer API; the trait only exposes the pieces needed to run
/// a game loop: legality, transitions, termination and the engine's reply.
///
/// Transitions are pure: `apply` returns a new state and leaves the input
/// untouched. Applying an illegal action returns the state unchanged.
pub trait Game: Clone + Send + Sync {
    /// The game state (board, side to move, status)
    type State: Clone + Send + fmt::Display;

    /// A game action (placement, relocation, disc drop)
    type Action: Clone + Copy + Send + Eq + Hash + fmt::Debug + fmt::Display;

    /// Short human-readable name of the game
    fn name(&self) -> &'static str;

    /// Returns a fresh game; may consume randomness for engine-chosen openings
    fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::State;

    /// Returns the side whose turn it is
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Returns all legal actions for the side to move
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Explains why `action` is illegal, or returns `Ok(())`
    fn validate(&self, state: &Self::State, action: Self::Action) -> Result<()>;

    /// Applies an action, returning a new state (no-op when illegal)
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the result of a finished game, `None` while in progress
    fn outcome(&self, state: &Self::State) -> Option<Outcome>;

    /// Lets the scripted opponent play its turn, or settles a forced pass
    /// when the side to move has no legal action.
    ///
    /// Returns the new state and the action taken, `None` if nothing was
    /// played. The state is unchanged when there is nothing for the engine
    /// to do.
    fn engine_turn<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        rng: &mut R,
    ) -> (Self::State, Option<Self::Action>);

    /// Parses a human move typed at the terminal
    fn parse_action(&self, state: &Self::State, input: &str) -> Result<Self::Action>;
}
