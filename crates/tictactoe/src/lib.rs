//! Parlor Tic-Tac-Toe - three-mark carry-limit tic-tac-toe
//!
//! Each side keeps at most three marks on the board; a fourth placement
//! evicts that side's oldest mark. The scripted opponent searches with
//! alpha-beta minimax and, once it holds three marks, may also lift one of
//! its marks onto an empty cell.
//!
//! # Example
//!
//! ```
//! use parlor_core::Side;
//! use parlor_tictactoe::{select_opponent_move, EngineConfig, TicTacToeState};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let config = EngineConfig::default();
//! let state = TicTacToeState::new_game(&mut rng, config.move_limit);
//!
//! let cell = (0..9).find(|&c| state.is_legal_placement(c, Side::Player)).unwrap();
//! let state = state.apply_placement(cell, Side::Player);
//!
//! let reply = select_opponent_move(&state, &config, &mut rng).unwrap();
//! let state = state.apply_move(reply);
//! assert_eq!(state.opponent_mark_count(), 2);
//! ```

pub mod config;
mod game_impl;
mod moves;
pub mod search;
pub mod state;

pub use config::EngineConfig;
pub use game_impl::TicTacToe;
pub use moves::TicTacToeMove;
pub use search::{select_opponent_move, Minimax};
pub use state::{check_winner, MarkQueue, Status, TicTacToeState};
