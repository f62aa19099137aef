//! Shared helpers for the ttt test suite.

#![allow(dead_code)]

use ttt::tictactoe::{GameState, Player, Seats, Square, Token};

/// A position where the computer holds `computer`, the human holds `human`
/// and every other square is open. The computer plays `X`.
pub fn position(computer: &[Square], human: &[Square], current: Player) -> GameState {
    let open = (1..=9)
        .filter(|sq| !computer.contains(sq) && !human.contains(sq))
        .collect();
    GameState::from_parts(
        Seats::new(computer.to_vec(), human.to_vec()),
        open,
        current,
        Seats::new(Token::X, Token::O),
    )
}

/// Snapshot of the three square sets, sorted
pub fn partition(game: &GameState) -> (Vec<Square>, Vec<Square>, Vec<Square>) {
    let mut open = game.open_squares().to_vec();
    let mut computer = game.moves(Player::Computer).to_vec();
    let mut human = game.moves(Player::Human).to_vec();
    open.sort_unstable();
    computer.sort_unstable();
    human.sort_unstable();
    (open, computer, human)
}
