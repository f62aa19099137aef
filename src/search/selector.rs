//! Picking a move from minimax scores

use rand::{Rng, prelude::IndexedRandom};
use tracing::debug;

use super::minimax::minimax;
use crate::{
    Error, Result,
    tictactoe::{CENTER, GameState, Player, Square},
};

/// Score every open square by playing it and running [`minimax`] on the
/// result. Scores are from the computer's side.
pub fn score_moves(state: &GameState) -> Vec<(Square, i32)> {
    state
        .open_squares()
        .iter()
        .enumerate()
        .map(|(index, &square)| (square, minimax(&state.successor(index))))
        .collect()
}

/// True while the player to move has not claimed a square yet.
///
/// Taking the center is a drawing reply to any opening, so this is when the
/// center shortcut of [`find_best_move`] is safe to enable.
pub fn opening_shortcut(state: &GameState) -> bool {
    state.moves(state.current_player()).is_empty()
}

/// Flip a computer-side score to the side of `mover`
fn for_mover(mover: Player, score: i32) -> i32 {
    match mover {
        Player::Computer => score,
        Player::Human => -score,
    }
}

/// Choose a move for the player to move.
///
/// With `shortcut_center` set the center is returned without searching
/// whenever it is open; only use that on the opening move. Otherwise every
/// open square is scored and one of the best is drawn uniformly from `rng`.
///
/// # Errors
///
/// - [`Error::AlreadyWon`] if the game already has a winner
/// - [`Error::NoValidMoves`] if no square is open
pub fn find_best_move<R: Rng + ?Sized>(
    state: &GameState,
    shortcut_center: bool,
    rng: &mut R,
) -> Result<Square> {
    if let Some(winner) = state.winner() {
        return Err(Error::AlreadyWon { winner });
    }
    if state.open_squares().is_empty() {
        return Err(Error::NoValidMoves);
    }
    if shortcut_center && state.open_squares().contains(&CENTER) {
        return Ok(CENTER);
    }

    let mover = state.current_player();
    let mut best_score: Option<i32> = None;
    let mut choices: Vec<Square> = Vec::new();
    for (square, score) in score_moves(state) {
        let score = for_mover(mover, score);
        match best_score {
            Some(best) if score < best => {}
            Some(best) if score == best => choices.push(square),
            _ => {
                best_score = Some(score);
                choices.clear();
                choices.push(square);
            }
        }
    }

    let pool = if choices.is_empty() {
        state.open_squares()
    } else {
        choices.as_slice()
    };
    let square = *pool.choose(rng).ok_or(Error::NoValidMoves)?;
    debug!(
        player = %mover,
        square,
        score = ?best_score,
        ties = choices.len(),
        "selected move"
    );
    Ok(square)
}

/// Find the best move for the player to move and play it.
///
/// # Errors
///
/// Same as [`find_best_move`].
pub fn play_best_move<R: Rng + ?Sized>(
    state: &mut GameState,
    shortcut_center: bool,
    rng: &mut R,
) -> Result<Square> {
    let square = find_best_move(state, shortcut_center, rng)?;
    state.play(square)?;
    Ok(square)
}
