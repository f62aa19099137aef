//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the game core and implemented by adapters.

pub mod repository;

pub use repository::{GameId, GameRepository};
