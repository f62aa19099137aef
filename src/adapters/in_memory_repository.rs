//! In-memory game repository.
//!
//! Games live in a mutex-guarded map for the lifetime of the process and are
//! keyed by a counter starting at 1.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, instrument};

use crate::{
    Error, Result,
    ports::{GameId, GameRepository},
    tictactoe::GameState,
};

#[derive(Debug)]
struct Storage {
    games: HashMap<GameId, GameState>,
    next_id: GameId,
}

/// In-memory repository.
///
/// # Thread Safety
///
/// Clones share the same underlying storage. A single mutex guards every
/// operation, so updates to one game never interleave.
#[derive(Debug, Clone)]
pub struct InMemoryGameRepository {
    storage: Arc<Mutex<Storage>>,
}

impl InMemoryGameRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(Storage {
                games: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Remove every stored game. Ids keep counting up.
    pub fn clear(&self) {
        self.lock().games.clear();
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.lock().games.contains_key(&id)
    }

    fn lock(&self) -> MutexGuard<'_, Storage> {
        // Games are replaced wholesale, so a panicked writer cannot leave one
        // half-updated.
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository for InMemoryGameRepository {
    #[instrument(skip_all)]
    fn insert(&self, game: GameState) -> GameId {
        let mut storage = self.lock();
        let id = storage.next_id;
        storage.next_id += 1;
        storage.games.insert(id, game);
        debug!(game_id = id, "stored new game");
        id
    }

    fn get(&self, id: GameId) -> Result<GameState> {
        self.lock()
            .games
            .get(&id)
            .cloned()
            .ok_or(Error::GameNotFound { id })
    }

    fn put(&self, id: GameId, game: GameState) {
        let mut storage = self.lock();
        storage.games.insert(id, game);
        if id >= storage.next_id {
            storage.next_id = id + 1;
        }
    }

    #[instrument(skip(self, f))]
    fn update(&self, id: GameId, f: &mut dyn FnMut(&mut GameState)) -> Result<()> {
        let mut storage = self.lock();
        let game = storage
            .games
            .get_mut(&id)
            .ok_or(Error::GameNotFound { id })?;
        // Work on a copy so a panic inside `f` leaves the stored game as it was.
        let mut working = game.clone();
        f(&mut working);
        *game = working;
        Ok(())
    }

    fn len(&self) -> usize {
        self.lock().games.len()
    }
}
