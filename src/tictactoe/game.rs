//! Game state and move application

use std::fmt;

use rand::Rng;

use super::{
    board::{Player, Seats, Square, Token},
    lines::{ALL_SQUARES, LineAnalyzer},
};
use crate::{Error, Result};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A square together with the token on it, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSquare {
    pub square: Square,
    pub token: Option<Token>,
}

/// Everything known about a game in progress
///
/// Moves are kept per player in play order. `Clone` gives an independent
/// copy, which is what the search branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    moves: Seats<Vec<Square>>,
    open: Vec<Square>,
    current: Player,
    round: u32,
    tokens: Seats<Token>,
}

impl GameState {
    /// Start a game with a uniformly random first player.
    ///
    /// The first player always plays `X`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = if rng.random_bool(0.5) {
            Player::Computer
        } else {
            Player::Human
        };
        Self::with_first_player(first)
    }

    /// Start a game with a fixed first player.
    ///
    /// # Examples
    ///
    /// ```
    /// use ttt::tictactoe::{GameState, Player, Token};
    ///
    /// let game = GameState::with_first_player(Player::Human);
    /// assert_eq!(game.current_player(), Player::Human);
    /// assert_eq!(game.token(Player::Human), Token::X);
    /// assert_eq!(game.open_squares().len(), 9);
    /// ```
    pub fn with_first_player(first: Player) -> Self {
        let mut tokens = Seats::new(Token::O, Token::O);
        tokens[first] = Token::X;
        GameState {
            moves: Seats::default(),
            open: ALL_SQUARES.to_vec(),
            current: first,
            round: 1,
            tokens,
        }
    }

    /// Assemble a position from its parts without validating it.
    ///
    /// Nothing checks that the three square lists partition the board; use
    /// [`GameState::is_consistent`] when that matters. The round number is
    /// derived from the number of claimed squares.
    pub fn from_parts(
        moves: Seats<Vec<Square>>,
        open: Vec<Square>,
        current: Player,
        tokens: Seats<Token>,
    ) -> Self {
        let played = moves.computer.len() + moves.human.len();
        GameState {
            moves,
            open,
            current,
            round: played as u32 + 1,
            tokens,
        }
    }

    /// Whose turn it is. Only meaningful while the game is not over.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Squares nobody has claimed yet, in ascending order
    pub fn open_squares(&self) -> &[Square] {
        &self.open
    }

    /// Squares claimed by `player`, in the order they were played
    pub fn moves(&self, player: Player) -> &[Square] {
        &self.moves[player]
    }

    pub fn token(&self, player: Player) -> Token {
        self.tokens[player]
    }

    pub fn tokens(&self) -> &Seats<Token> {
        &self.tokens
    }

    /// The player holding `token`
    pub fn player_for(&self, token: Token) -> Player {
        if self.tokens.computer == token {
            Player::Computer
        } else {
            Player::Human
        }
    }

    /// Count of moves played so far, plus one
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The player whose claimed squares cover a winning line.
    ///
    /// Players are checked in [`Player::ALL`] order, so an impossible board
    /// where both sides hold a line reports the computer.
    pub fn winner(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&player| LineAnalyzer::has_won(&self.moves[player]))
    }

    /// True once someone has won or no square is left
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.open.is_empty()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winner() {
            Some(player) => Some(GameOutcome::Win(player)),
            None if self.open.is_empty() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Claim `square` for the current player and pass the turn.
    ///
    /// The move is all-or-nothing: on error the state is untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyWon`] if a winner already exists. A full board
    ///   without a winner is not rejected here; the square check catches it.
    /// - [`Error::InvalidMove`] if `square` is not open (taken or outside 1-9).
    pub fn play(&mut self, square: Square) -> Result<()> {
        if let Some(winner) = self.winner() {
            return Err(Error::AlreadyWon { winner });
        }
        let index = self
            .open
            .iter()
            .position(|&open| open == square)
            .ok_or(Error::InvalidMove {
                square: square.into(),
            })?;
        self.claim(index);
        Ok(())
    }

    /// Independent copy with `square` played.
    ///
    /// # Errors
    ///
    /// Same as [`GameState::play`].
    pub fn branch(&self, square: Square) -> Result<GameState> {
        let mut next = self.clone();
        next.play(square)?;
        Ok(next)
    }

    /// Independent copy with the `index`-th open square played, skipping the
    /// winner check. Callers must know the game is not over.
    pub(crate) fn successor(&self, index: usize) -> GameState {
        let mut next = self.clone();
        next.claim(index);
        next
    }

    fn claim(&mut self, index: usize) {
        let square = self.open.remove(index);
        self.moves[self.current].push(square);
        self.round += 1;
        // The turn passes even when this move wins.
        self.current = self.current.opponent();
    }

    /// Token on `square`, checking the computer's squares first
    pub fn token_at(&self, square: Square) -> Option<Token> {
        Player::ALL
            .into_iter()
            .find(|&player| self.moves[player].contains(&square))
            .map(|player| self.tokens[player])
    }

    /// All nine squares with their tokens, in square order
    pub fn full_board(&self) -> Vec<BoardSquare> {
        ALL_SQUARES
            .iter()
            .map(|&square| BoardSquare {
                square,
                token: self.token_at(square),
            })
            .collect()
    }

    /// Check that open and claimed squares partition 1-9 with no repeats
    pub fn is_consistent(&self) -> bool {
        let mut seen = [0u8; 9];
        let all = self
            .open
            .iter()
            .chain(&self.moves.computer)
            .chain(&self.moves.human);
        for &square in all {
            match square {
                1..=9 => seen[usize::from(square) - 1] += 1,
                _ => return false,
            }
        }
        seen.iter().all(|&count| count == 1)
    }

    /// Printable three-row grid; each square shows its token or its number
    /// followed by a space.
    ///
    /// # Examples
    ///
    /// ```
    /// use ttt::tictactoe::{GameState, Player};
    ///
    /// let game = GameState::with_first_player(Player::Computer);
    /// assert_eq!(game.render_board(), "1 2 3 \n4 5 6 \n7 8 9 ");
    /// ```
    pub fn render_board(&self) -> String {
        ALL_SQUARES
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|&square| match self.token_at(square) {
                        Some(token) => format!("{token} "),
                        None => format!("{square} "),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_board())
    }
}
