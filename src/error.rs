//! Error types for the ttt crate

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the ttt crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid square or already taken: {square}")]
    InvalidMove { square: i64 },

    #[error("already won by {winner}")]
    AlreadyWon { winner: Player },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("game {id} not found")]
    GameNotFound { id: u64 },

    #[error("game not specified")]
    GameNotSpecified,

    #[error("not a game id: {raw:?}")]
    InvalidGameId { raw: String },
}

impl Error {
    /// True for the two errors a rejected move can produce.
    pub fn is_move_rejection(&self) -> bool {
        matches!(self, Error::InvalidMove { .. } | Error::AlreadyWon { .. })
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
