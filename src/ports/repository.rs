//! Repository port for game sessions.
//!
//! This module defines the trait boundary between the game rules and
//! whatever keeps games alive between requests.

use crate::{Result, tictactoe::GameState};

/// Identifier handed out when a game is stored
pub type GameId = u64;

/// Port for storing games between requests.
///
/// Implementations must serialize access per game: [`GameRepository::update`]
/// gives the closure exclusive access to the stored game for its whole run.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use ttt::{adapters::InMemoryGameRepository, ports::GameRepository, tictactoe::GameState};
///
/// let repo = InMemoryGameRepository::new();
/// let mut rng = StdRng::seed_from_u64(1);
/// let id = repo.insert(GameState::new(&mut rng));
///
/// repo.update(id, &mut |game| {
///     game.play(5).unwrap();
/// })?;
/// assert_eq!(repo.get(id)?.open_squares().len(), 8);
/// # Ok::<(), ttt::Error>(())
/// ```
pub trait GameRepository {
    /// Store a new game and return its freshly assigned id.
    fn insert(&self, game: GameState) -> GameId;

    /// Copy of the game stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameNotFound`] for an unknown id.
    fn get(&self, id: GameId) -> Result<GameState>;

    /// Store `game` under an existing or caller-chosen id.
    fn put(&self, id: GameId, game: GameState);

    /// Run `f` against the stored game while holding exclusive access.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameNotFound`] for an unknown id.
    fn update(&self, id: GameId, f: &mut dyn FnMut(&mut GameState)) -> Result<()>;

    /// Number of stored games.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
