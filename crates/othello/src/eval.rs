//! Static position evaluation.

use crate::square::NUM_SQUARES;
use crate::{Board, Disc, Square};

/// Tunable weights for [`evaluate`].
#[derive(Clone, Debug, PartialEq)]
pub struct EvalWeights {
    /// Value of each square, row-major from the top-left.
    pub positional: [i32; NUM_SQUARES as usize],
    /// Disc total at which disc difference alone decides the phase term.
    pub endgame_threshold: u32,
    /// Per-disc weight once the endgame threshold is reached.
    pub endgame_disc_weight: i32,
    /// Per-move weight of the mobility difference before the endgame.
    pub mobility_weight: i32,
    /// Per-disc weight before the endgame.
    pub disc_weight: i32,
    /// Added when a move leaves the other side without a reply.
    pub pass_bonus: i32,
}

const CORNER: i32 = 120;
const CORNER_EDGE: i32 = -20;
const X_SQUARE: i32 = -40;
const EDGE: i32 = 20;
const INNER: i32 = 5;
const CENTER: i32 = 15;

#[rustfmt::skip]
const POSITIONAL: [i32; NUM_SQUARES as usize] = [
    CORNER,      CORNER_EDGE, EDGE,   EDGE,   CORNER_EDGE, CORNER,
    CORNER_EDGE, X_SQUARE,    INNER,  INNER,  X_SQUARE,    CORNER_EDGE,
    EDGE,        INNER,       CENTER, CENTER, INNER,       EDGE,
    EDGE,        INNER,       CENTER, CENTER, INNER,       EDGE,
    CORNER_EDGE, X_SQUARE,    INNER,  INNER,  X_SQUARE,    CORNER_EDGE,
    CORNER,      CORNER_EDGE, EDGE,   EDGE,   CORNER_EDGE, CORNER,
];

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            positional: POSITIONAL,
            endgame_threshold: 30,
            endgame_disc_weight: 10,
            mobility_weight: 5,
            disc_weight: 2,
            pass_bonus: 30,
        }
    }
}

impl EvalWeights {
    /// Weight of a single square.
    #[inline]
    pub fn square_value(&self, sq: Square) -> i32 {
        self.positional[sq.index()]
    }

    /// Sum of square values over `disc`'s discs minus the opponent's.
    pub fn positional_score(&self, board: &Board, disc: Disc) -> i32 {
        let sum = |d: Disc| -> i32 { board.discs(d).iter().map(|sq| self.square_value(sq)).sum() };
        sum(disc) - sum(disc.opposite())
    }
}

/// Score `board` from `disc`'s point of view; higher is better for `disc`.
pub fn evaluate(board: &Board, disc: Disc, weights: &EvalWeights) -> i32 {
    let opp = disc.opposite();
    let disc_diff = board.count(disc) as i32 - board.count(opp) as i32;

    let phase = if board.total() >= weights.endgame_threshold {
        weights.endgame_disc_weight * disc_diff
    } else {
        let mobility = board.find_legal_moves(disc).popcount() as i32
            - board.find_legal_moves(opp).popcount() as i32;
        weights.mobility_weight * mobility + weights.disc_weight * disc_diff
    };

    weights.positional_score(board, disc) + phase
}
