//! Subcommands of the ttt binary

pub mod best_move;
pub mod play;
pub mod selfplay;
pub mod serve;
