//! Squares, players and the tokens they play with

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};

/// A square on the board, numbered 1-9 row by row
pub type Square = u8;

/// A player in the game
///
/// The computer is the maximizing side of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "computer")]
    Computer,
    #[serde(rename = "player")]
    Human,
}

impl Player {
    /// Both players, in the order winning lines are checked
    pub const ALL: [Player; 2] = [Player::Computer, Player::Human];

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::Computer => Player::Human,
            Player::Human => Player::Computer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::Computer => "computer",
            Player::Human => "player",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mark a player leaves on a claimed square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    X,
    O,
}

impl Token {
    pub fn to_char(self) -> char {
        match self {
            Token::X => 'X',
            Token::O => 'O',
        }
    }

    pub fn other(self) -> Token {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One value per player, indexed by [`Player`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Seats<T> {
    pub computer: T,
    pub human: T,
}

impl<T> Seats<T> {
    pub fn new(computer: T, human: T) -> Self {
        Seats { computer, human }
    }

    /// Iterate `(player, value)` pairs in [`Player::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().map(move |player| (player, &self[player]))
    }
}

impl<T> Index<Player> for Seats<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        match player {
            Player::Computer => &self.computer,
            Player::Human => &self.human,
        }
    }
}

impl<T> IndexMut<Player> for Seats<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::Computer => &mut self.computer,
            Player::Human => &mut self.human,
        }
    }
}
