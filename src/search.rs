//! Move search: exhaustive minimax and the move selector built on it

pub mod minimax;
pub mod selector;

pub use minimax::{COMPUTER_WIN, DRAW, HUMAN_WIN, minimax, terminal_score};
pub use selector::{find_best_move, opening_shortcut, play_best_move, score_moves};
