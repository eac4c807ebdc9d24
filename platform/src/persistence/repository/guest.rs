//! Repository for guests, including token lookup and expiry pruning.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use daily_domain::{Guest, Model};

use super::BaseRepository;
use crate::persistence::{EntityStore, PersistenceError, Repository, SqliteStore};

/// [`BaseRepository`] for [`Guest`] plus token and expiry helpers.
#[derive(Clone)]
pub struct GuestRepository<S = SqliteStore> {
    base: BaseRepository<Guest, S>,
}

impl<S: EntityStore> GuestRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Guest, PersistenceError> {
        self.base
            .first_where("token", token)
            .await?
            .ok_or_else(|| PersistenceError::not_found(Guest::NAME, token))
    }

    /// Guests whose token had expired at `now`.
    pub async fn expired(&self, now: DateTime<Utc>) -> Result<Vec<Guest>, PersistenceError> {
        self.base.find_where(move |guest| guest.is_expired(now)).await
    }

    /// Delete expired guests (their results cascade). Returns how many were removed.
    pub async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, PersistenceError> {
        let expired = self.expired(now).await?;
        for guest in &expired {
            self.base.delete(&guest.id).await?;
        }
        tracing::info!(pruned = expired.len(), "Pruned expired guests");
        Ok(expired.len())
    }
}

impl<S> Deref for GuestRepository<S> {
    type Target = BaseRepository<Guest, S>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Database;
    use chrono::Duration;
    use daily_domain::GuestAttributes;

    async fn test_repo() -> (Database, GuestRepository) {
        let db = Database::new_in_memory().await.unwrap();
        let repo = GuestRepository::new(crate::persistence::SqliteStore::from_database(&db));
        (db, repo)
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let (_db, repo) = test_repo().await;
        let guest = repo
            .create(GuestAttributes::default().token(Guest::generate_token()))
            .await
            .unwrap();
        assert_eq!(repo.find_by_token(&guest.token).await.unwrap(), guest);
        assert!(repo
            .find_by_token(&Guest::generate_token())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_prune_expired_keeps_fresh_guests() {
        let (_db, repo) = test_repo().await;
        let now = daily_domain::now();
        let fresh = repo
            .create(GuestAttributes::default().token(Guest::generate_token()))
            .await
            .unwrap();
        for _ in 0..3 {
            repo.create(
                GuestAttributes::default()
                    .token(Guest::generate_token())
                    .created_at(now - Duration::days(45)),
            )
            .await
            .unwrap();
        }

        assert_eq!(repo.expired(now).await.unwrap().len(), 3);
        assert_eq!(repo.prune_expired(now).await.unwrap(), 3);
        assert_eq!(repo.all().await.unwrap(), vec![fresh]);
    }
}
