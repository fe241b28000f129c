//! Building blocks of the `parlor` terminal client: input routing, the chat
//! boundary, game sessions and the engine benchmark.

pub mod bench;
pub mod chat;
pub mod router;
pub mod session;
