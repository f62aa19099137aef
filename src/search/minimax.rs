//! Exhaustive minimax over the remaining game tree

use crate::tictactoe::{GameState, Player};

/// Score of a finished game the computer won
pub const COMPUTER_WIN: i32 = 1;
/// Score of a finished game the human won
pub const HUMAN_WIN: i32 = -1;
/// Score of a finished game with no winner
pub const DRAW: i32 = 0;

/// Score of a finished game from the computer's side, `None` while play
/// continues.
pub fn terminal_score(state: &GameState) -> Option<i32> {
    if !state.is_over() {
        return None;
    }
    Some(match state.winner() {
        Some(Player::Computer) => COMPUTER_WIN,
        Some(Player::Human) => HUMAN_WIN,
        None => DRAW,
    })
}

/// Value of `state` under perfect play by both sides.
///
/// The computer maximizes, the human minimizes. Every open square is tried
/// in ascending order without pruning; among equal scores the first one
/// found is kept.
pub fn minimax(state: &GameState) -> i32 {
    if let Some(score) = terminal_score(state) {
        return score;
    }

    let mover = state.current_player();
    let mut best: Option<i32> = None;
    for index in 0..state.open_squares().len() {
        let score = minimax(&state.successor(index));
        best = Some(match (mover, best) {
            (_, None) => score,
            (Player::Computer, Some(current)) if score > current => score,
            (Player::Human, Some(current)) if score < current => score,
            (_, Some(current)) => current,
        });
    }

    // A game that is not over has at least one open square.
    best.unwrap_or(DRAW)
}
