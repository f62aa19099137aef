//! Tic-tac-toe engine with an exhaustive minimax move advisor
//!
//! This crate provides:
//! - The game rules: winning lines, game state and move application
//! - Minimax search over the full game tree and a move selector on top of it
//! - An in-memory session store behind a repository port
//! - HTTP and terminal front ends

pub mod adapters;
pub mod api;
pub mod cli;
pub mod error;
pub mod ports;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{find_best_move, minimax};
pub use tictactoe::{GameOutcome, GameState, Player, Square, Token};
