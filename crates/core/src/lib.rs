//! Parlor Core - Game abstractions and common types
//!
//! This crate provides the [`Game`] trait that the terminal shell drives,
//! the [`Side`] and [`Outcome`] types both engines report in, and the
//! shared [`ParlorError`].

mod error;
mod game;
mod types;

pub use error::{ParlorError, Result};
pub use game::Game;
pub use types::{Outcome, Side};
