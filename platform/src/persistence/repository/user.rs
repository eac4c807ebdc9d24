//! Repository for users.

use std::ops::Deref;

use daily_domain::{Model, User};

use super::BaseRepository;
use crate::persistence::{EntityStore, PersistenceError, SqliteStore};

/// [`BaseRepository`] for [`User`] plus lookup by email.
#[derive(Clone)]
pub struct UserRepository<S = SqliteStore> {
    base: BaseRepository<User, S>,
}

impl<S: EntityStore> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, PersistenceError> {
        self.base
            .first_where("email", email)
            .await?
            .ok_or_else(|| PersistenceError::not_found(User::NAME, email))
    }
}

impl<S> Deref for UserRepository<S> {
    type Target = BaseRepository<User, S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
