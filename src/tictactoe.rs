//! Tic-Tac-Toe rules: board geometry, players and game state

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Player, Seats, Square, Token};
pub use game::{BoardSquare, GameOutcome, GameState};
pub use lines::{ALL_SQUARES, CENTER, LineAnalyzer, WINNING_LINES};
