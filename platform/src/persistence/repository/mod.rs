//! The generic repository and its per-entity specializations.
//!
//! [`BaseRepository`] is the single implementation of [`Repository`]; it knows
//! nothing about any particular entity beyond its [`Record`] mapping. The
//! specialized repositories wrap one and add entity-specific lookups only.
//! They dereference to the wrapped `BaseRepository`, so the CRUD surface is
//! the same everywhere.

mod game;
mod guest;
mod user;

pub use game::GameRepository;
pub use guest::GuestRepository;
pub use user::UserRepository;

use std::marker::PhantomData;

use daily_domain::{new_id, now, Model};

use super::traits::{EntityStore, Repository};
use super::{PersistenceError, Record, SqlValue, SqliteStore};

/// Generic CRUD over one entity type, backed by a shared store handle.
#[derive(Clone)]
pub struct BaseRepository<E, S = SqliteStore> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Record, S: EntityStore> BaseRepository<E, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Like [`Repository::create`], with a caller-chosen id.
    pub async fn create_with_id(
        &self,
        id: impl Into<String>,
        attributes: E::Attributes,
    ) -> Result<E, PersistenceError> {
        let entity = E::from_attributes(id.into(), attributes)?;
        self.store.insert(&entity).await?;
        tracing::debug!(entity = E::NAME, id = %entity.id(), "Created record");
        Ok(entity)
    }

    /// Entities whose `column` equals `value`, filtered by the store.
    pub async fn where_column(
        &self,
        column: &str,
        value: impl Into<SqlValue>,
    ) -> Result<Vec<E>, PersistenceError> {
        self.store.fetch_by::<E>(column, value.into()).await
    }

    /// The oldest entity whose `column` equals `value`, if any.
    pub async fn first_where(
        &self,
        column: &str,
        value: impl Into<SqlValue>,
    ) -> Result<Option<E>, PersistenceError> {
        Ok(self.where_column(column, value).await?.into_iter().next())
    }

    /// Bump `updated_at` to the current time.
    pub async fn touch(&self, id: &str) -> Result<E, PersistenceError> {
        let mut entity = self.find_by_id(id).await?;
        entity.touch(now());
        self.save(&entity).await?;
        Ok(entity)
    }

    pub async fn count(&self) -> Result<u64, PersistenceError> {
        self.store.count::<E>().await
    }

    /// Delete every entity of this type.
    pub async fn truncate(&self) -> Result<u64, PersistenceError> {
        self.store.truncate::<E>().await
    }

    async fn save(&self, entity: &E) -> Result<(), PersistenceError> {
        if self.store.replace(entity).await? {
            Ok(())
        } else {
            Err(PersistenceError::not_found(E::NAME, entity.id()))
        }
    }
}

impl<E: Record, S: EntityStore> Repository<E> for BaseRepository<E, S> {
    async fn find_by_id(&self, id: &str) -> Result<E, PersistenceError> {
        self.store
            .fetch::<E>(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(E::NAME, id))
    }

    async fn all(&self) -> Result<Vec<E>, PersistenceError> {
        self.store.fetch_all::<E>().await
    }

    async fn find_where<P>(&self, predicate: P) -> Result<Vec<E>, PersistenceError>
    where
        P: Fn(&E) -> bool + Send,
    {
        let mut entities = self.store.fetch_all::<E>().await?;
        entities.retain(|entity| predicate(entity));
        Ok(entities)
    }

    async fn create(&self, attributes: E::Attributes) -> Result<E, PersistenceError> {
        self.create_with_id(new_id(), attributes).await
    }

    async fn update(&self, id: &str, attributes: E::Attributes) -> Result<E, PersistenceError> {
        let mut entity = self.find_by_id(id).await?;
        entity.apply(attributes)?;
        self.save(&entity).await?;
        tracing::debug!(entity = E::NAME, id, "Updated record");
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        if !self.store.remove::<E>(id).await? {
            return Err(PersistenceError::not_found(E::NAME, id));
        }
        tracing::debug!(entity = E::NAME, id, "Deleted record");
        Ok(())
    }
}
