//! Parlor Othello - 6×6 Othello on 36-bit bitboards
//!
//! Black (the human) moves first from the standard centre cross. The engine
//! plays White: it always takes a corner when one is legal and otherwise
//! looks one ply ahead, assuming Black answers with the reply that is worst
//! for White under a positional evaluation.
//!
//! # Example
//!
//! ```
//! use parlor_othello::{engine_turn, Disc, EvalWeights, OthelloState, Square};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = OthelloState::new();
//! let state = state.apply_move(Square::parse("c2").unwrap());
//! assert_eq!((state.black_count(), state.white_count()), (4, 1));
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let (state, reply) = engine_turn(&state, &EvalWeights::default(), &mut rng);
//! assert!(reply.is_some());
//! assert_eq!(state.current_player(), Disc::Black);
//! ```

mod bitboard;
mod board;
pub mod engine;
pub mod eval;
mod game_impl;
mod square;
mod state;

pub use bitboard::{Bitboard, BitboardIter, Direction};
pub use board::{Board, Disc};
pub use engine::{engine_turn, select_opponent_move};
pub use eval::{evaluate, EvalWeights};
pub use game_impl::Othello;
pub use square::{Square, NUM_SQUARES, SIZE};
pub use state::OthelloState;
