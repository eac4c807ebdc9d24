//! Repository for games.

use std::ops::Deref;

use daily_domain::{Game, Model};

use super::BaseRepository;
use crate::persistence::{EntityStore, PersistenceError, SqliteStore};

/// [`BaseRepository`] for [`Game`] plus lookup by slug.
#[derive(Clone)]
pub struct GameRepository<S = SqliteStore> {
    base: BaseRepository<Game, S>,
}

impl<S: EntityStore> GameRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Game, PersistenceError> {
        self.base
            .first_where("slug", slug)
            .await?
            .ok_or_else(|| PersistenceError::not_found(Game::NAME, slug))
    }
}

impl<S> Deref for GameRepository<S> {
    type Target = BaseRepository<Game, S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
