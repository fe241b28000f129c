//! Minimax search with alpha-beta pruning for the tic-tac-toe opponent.
//!
//! Scores are always from the opponent's point of view: positive favours the
//! engine, negative favours the human.

use parlor_core::Side;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::state::{Status, TicTacToeState, CELLS, LINES, MAX_MARKS};
use crate::{EngineConfig, TicTacToeMove};

/// Base score of a decided game; the ply count is subtracted so that faster
/// wins and slower losses are preferred.
pub const WIN_SCORE: i32 = 100;

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

const CENTER_WEIGHT: i32 = 3;
const CORNER_WEIGHT: i32 = 2;
const TWO_IN_LINE: i32 = 5;
const ONE_IN_LINE: i32 = 1;
const PLAYER_THREAT: i32 = -5;

/// Static evaluation of a non-terminal board.
pub fn heuristic(board: &[Option<Side>; CELLS]) -> i32 {
    let weight = |cell: usize, value: i32| match board[cell] {
        Some(Side::Opponent) => value,
        Some(Side::Player) => -value,
        None => 0,
    };

    let mut score = weight(CENTER, CENTER_WEIGHT);
    for corner in CORNERS {
        score += weight(corner, CORNER_WEIGHT);
    }

    for line in LINES {
        let mut ours = 0;
        let mut theirs = 0;
        let mut empty = 0;
        for cell in line {
            match board[cell] {
                Some(Side::Opponent) => ours += 1,
                Some(Side::Player) => theirs += 1,
                None => empty += 1,
            }
        }
        if ours == 2 && empty == 1 {
            score += TWO_IN_LINE;
        } else if ours == 1 && empty == 2 {
            score += ONE_IN_LINE;
        }
        if theirs == 2 && empty == 1 {
            score += PLAYER_THREAT;
        }
    }

    score
}

/// Evaluate a search leaf reached after `ply` half-moves.
pub fn evaluate(state: &TicTacToeState, ply: i32) -> i32 {
    match state.status() {
        Status::Won(Side::Opponent) => WIN_SCORE - ply,
        Status::Won(Side::Player) => ply - WIN_SCORE,
        Status::Draw => 0,
        Status::InProgress => heuristic(state.board()),
    }
}

/// Minimax searcher with alpha-beta pruning.
pub struct Minimax {
    depth: usize,
}

impl Minimax {
    /// Create a searcher with a fixed depth.
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Create a searcher with the depth `config` prescribes for `state`.
    pub fn for_state(config: &EngineConfig, state: &TicTacToeState) -> Self {
        Self::new(config.depth_for(state))
    }

    /// Get the best move for the side to move, with its score.
    ///
    /// The first move reaching the best score wins ties.
    pub fn best_move(&self, state: &TicTacToeState) -> Option<(TicTacToeMove, i32)> {
        let moves = state.legal_moves();
        if moves.is_empty() || self.depth == 0 {
            return None;
        }

        let maximizing = state.turn() == Side::Opponent;
        let mut best: Option<(TicTacToeMove, i32)> = None;

        for mv in moves {
            let child = state.apply_move(mv);
            let score = self.alphabeta(&child, self.depth - 1, 1, i32::MIN, i32::MAX);

            let better = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((mv, score));
            }
        }

        best
    }

    fn alphabeta(
        &self,
        state: &TicTacToeState,
        depth: usize,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        if depth == 0 || state.is_game_over() {
            return evaluate(state, ply);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return evaluate(state, ply);
        }

        if state.turn() == Side::Opponent {
            let mut max_eval = i32::MIN;
            for mv in moves {
                let child = state.apply_move(mv);
                let eval = self.alphabeta(&child, depth - 1, ply + 1, alpha, beta);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                let child = state.apply_move(mv);
                let eval = self.alphabeta(&child, depth - 1, ply + 1, alpha, beta);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            min_eval
        }
    }
}

/// First move that wins on the spot for the side to move.
pub fn winning_move(state: &TicTacToeState) -> Option<TicTacToeMove> {
    let mover = state.turn();
    state
        .legal_moves()
        .into_iter()
        .find(|&mv| state.apply_move(mv).winner() == Some(mover))
}

/// True if the side to move in `state` can win immediately. For the player
/// that means a placement, evictions included.
pub fn has_winning_move(state: &TicTacToeState) -> bool {
    winning_move(state).is_some()
}

/// Keep `preferred` if it leaves the player no winning placement, otherwise
/// return the first move that does. `None` means no move helps.
fn blocking_move(state: &TicTacToeState, preferred: Option<TicTacToeMove>) -> Option<TicTacToeMove> {
    if let Some(mv) = preferred {
        if !has_winning_move(&state.apply_move(mv)) {
            return Some(mv);
        }
    }
    state
        .legal_moves()
        .into_iter()
        .find(|&mv| !has_winning_move(&state.apply_move(mv)))
}

/// Choose the opponent's move.
///
/// Returns `None` when the game is over or it is not the opponent's turn.
/// Once the opponent holds three marks, an immediate win and then a block of
/// the player's immediate win override the search result.
pub fn select_opponent_move<R: Rng + ?Sized>(
    state: &TicTacToeState,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<TicTacToeMove> {
    if state.is_game_over() || state.turn() != Side::Opponent {
        return None;
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        return None;
    }

    let relocation_phase = state.opponent_mark_count() >= MAX_MARKS;

    if relocation_phase {
        if let Some(mv) = winning_move(state) {
            tracing::debug!(%mv, "opponent takes immediate win");
            return Some(mv);
        }
    }

    let searcher = Minimax::for_state(config, state);
    let mut choice = searcher.best_move(state).map(|(mv, score)| {
        tracing::debug!(%mv, score, depth = searcher.depth, "minimax choice");
        mv
    });

    if relocation_phase {
        if let Some(block) = blocking_move(state, choice) {
            if Some(block) != choice {
                tracing::debug!(%block, "overriding search to block player");
            }
            choice = Some(block);
        }
    }

    choice.or_else(|| {
        tracing::debug!("no scored move, picking at random");
        moves.choose(rng).copied()
    })
}
