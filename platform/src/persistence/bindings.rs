//! Repository bindings.
//!
//! [`Repositories`] is built once at startup from a single store handle and
//! passed by reference to everything that needs data access. Every repository
//! inside shares that one store, and the set cannot be rebound afterwards.

use daily_domain::{Badge, GameResult, UserBadge, WordScramblePuzzle};

use super::repository::{BaseRepository, GameRepository, GuestRepository, UserRepository};
use super::{EntityStore, PersistenceError, SqliteStore};

pub struct Repositories<S = SqliteStore> {
    store: S,
    guests: GuestRepository<S>,
    games: GameRepository<S>,
    users: UserRepository<S>,
    badges: BaseRepository<Badge, S>,
    puzzles: BaseRepository<WordScramblePuzzle, S>,
    user_badges: BaseRepository<UserBadge, S>,
    results: BaseRepository<GameResult, S>,
}

impl<S: EntityStore> Repositories<S> {
    /// Bind one repository per entity type to `store`.
    pub fn bind(store: S) -> Self {
        Self {
            guests: GuestRepository::new(store.clone()),
            games: GameRepository::new(store.clone()),
            users: UserRepository::new(store.clone()),
            badges: BaseRepository::new(store.clone()),
            puzzles: BaseRepository::new(store.clone()),
            user_badges: BaseRepository::new(store.clone()),
            results: BaseRepository::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn guests(&self) -> &GuestRepository<S> {
        &self.guests
    }

    pub fn games(&self) -> &GameRepository<S> {
        &self.games
    }

    pub fn users(&self) -> &UserRepository<S> {
        &self.users
    }

    pub fn badges(&self) -> &BaseRepository<Badge, S> {
        &self.badges
    }

    pub fn puzzles(&self) -> &BaseRepository<WordScramblePuzzle, S> {
        &self.puzzles
    }

    pub fn user_badges(&self) -> &BaseRepository<UserBadge, S> {
        &self.user_badges
    }

    pub fn results(&self) -> &BaseRepository<GameResult, S> {
        &self.results
    }

    /// Empty every table, dependents before the rows they reference.
    pub async fn truncate_all(&self) -> Result<u64, PersistenceError> {
        let mut removed = 0;
        removed += self.results.truncate().await?;
        removed += self.user_badges.truncate().await?;
        removed += self.puzzles.truncate().await?;
        removed += self.badges.truncate().await?;
        removed += self.users.truncate().await?;
        removed += self.games.truncate().await?;
        removed += self.guests.truncate().await?;
        tracing::info!(removed, "Cleared all tables");
        Ok(removed)
    }
}
