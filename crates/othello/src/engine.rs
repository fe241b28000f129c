//! White's move selection: corners first, then a one-ply lookahead.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::eval::{evaluate, EvalWeights};
use crate::{Bitboard, Board, Disc, OthelloState, Square};

/// Colour the engine plays.
pub const ENGINE_DISC: Disc = Disc::White;

/// Best of `candidates` by static evaluation of the position right after the
/// move. The first square in index order wins ties.
pub fn best_by_static(
    board: &Board,
    candidates: Bitboard,
    disc: Disc,
    weights: &EvalWeights,
) -> Option<(Square, i32)> {
    let mut best: Option<(Square, i32)> = None;
    for sq in candidates {
        let score = evaluate(&board.play(sq, disc), disc, weights);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((sq, score));
        }
    }
    best
}

/// Score a move by the opponent's best reply.
///
/// A move that leaves the opponent without a reply scores its static value
/// plus the pass bonus.
pub fn lookahead_score(board: &Board, sq: Square, disc: Disc, weights: &EvalWeights) -> i32 {
    let next = board.play(sq, disc);
    let replies = next.find_legal_moves(disc.opposite());
    if replies.is_empty() {
        return evaluate(&next, disc, weights) + weights.pass_bonus;
    }
    replies
        .iter()
        .map(|reply| evaluate(&next.play(reply, disc.opposite()), disc, weights))
        .min()
        .unwrap_or_else(|| evaluate(&next, disc, weights))
}

/// Best of `candidates` by one-ply minimax. The first square in index order
/// wins ties.
pub fn best_by_lookahead(
    board: &Board,
    candidates: Bitboard,
    disc: Disc,
    weights: &EvalWeights,
) -> Option<(Square, i32)> {
    let mut best: Option<(Square, i32)> = None;
    for sq in candidates {
        let score = lookahead_score(board, sq, disc, weights);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((sq, score));
        }
    }
    best
}

/// Choose White's move.
///
/// Returns `None` when the game is over, it is Black's turn, or White has no
/// legal move (the caller should then resolve the pass). A legal corner is
/// always preferred over any other square.
pub fn select_opponent_move<R: Rng + ?Sized>(
    state: &OthelloState,
    weights: &EvalWeights,
    rng: &mut R,
) -> Option<Square> {
    if state.is_game_over() || state.current_player() != ENGINE_DISC {
        return None;
    }
    let board = state.board();
    let moves = state.legal_moves_bitboard();
    if moves.is_empty() {
        return None;
    }

    let corners = moves & Bitboard::CORNERS;
    if corners.is_not_empty() {
        if let Some((sq, score)) = best_by_static(board, corners, ENGINE_DISC, weights) {
            tracing::debug!(%sq, score, "opponent takes corner");
            return Some(sq);
        }
    }

    let choice = best_by_lookahead(board, moves, ENGINE_DISC, weights)
        .or_else(|| best_by_static(board, moves, ENGINE_DISC, weights));
    if let Some((sq, score)) = choice {
        tracing::debug!(%sq, score, "one-ply choice");
        return Some(sq);
    }

    tracing::debug!("no scored move, picking at random");
    let all: Vec<Square> = moves.iter().collect();
    all.choose(rng).copied()
}

/// Let the engine act on `state`.
///
/// Plays White's chosen move, or settles a forced pass for whichever side is
/// to move. Returns the move played, `None` if nothing was played.
pub fn engine_turn<R: Rng + ?Sized>(
    state: &OthelloState,
    weights: &EvalWeights,
    rng: &mut R,
) -> (OthelloState, Option<Square>) {
    if state.is_game_over() {
        return (*state, None);
    }
    if state.legal_moves_bitboard().is_empty() {
        return (state.resolve_pass(), None);
    }
    match select_opponent_move(state, weights, rng) {
        Some(sq) => (state.apply_move(sq), Some(sq)),
        None => (*state, None),
    }
}
