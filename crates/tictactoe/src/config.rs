//! Opponent search and game-length configuration.

use crate::state::{TicTacToeState, DEFAULT_MOVE_LIMIT, MAX_MARKS};

/// Tic-tac-toe engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth (plies) while both sides are below the mark cap.
    pub placement_depth: usize,

    /// Search depth once either side holds three marks.
    /// Relocations widen the tree, so this is kept shallower.
    pub capped_depth: usize,

    /// Half-moves after which an undecided game is a draw.
    pub move_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            placement_depth: 5,
            capped_depth: 4,
            move_limit: DEFAULT_MOVE_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Create a config with a custom draw limit.
    pub fn with_move_limit(move_limit: u32) -> Self {
        Self {
            move_limit,
            ..Default::default()
        }
    }

    /// Search depth to use from `state`.
    pub fn depth_for(&self, state: &TicTacToeState) -> usize {
        if state.player_mark_count() >= MAX_MARKS || state.opponent_mark_count() >= MAX_MARKS {
            self.capped_depth
        } else {
            self.placement_depth
        }
    }
}
