//! Async trait definitions for the persistence layer.
//!
//! [`EntityStore`] is the storage boundary: typed CRUD by primary key plus
//! equality queries, for any [`Record`]. [`Repository`] is the contract callers
//! program against; [`BaseRepository`](super::BaseRepository) implements it once
//! for every entity type.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` and can be driven from any tokio task.

use std::future::Future;

use daily_domain::Model;

use super::{PersistenceError, Record, SqlValue};

/// Storage boundary for typed records.
///
/// Implementations enforce uniqueness and referential integrity and report
/// violations as [`PersistenceError::ConstraintViolation`].
pub trait EntityStore: Clone + Send + Sync + 'static {
    fn insert<E: Record>(
        &self,
        record: &E,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    fn fetch<E: Record>(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<E>, PersistenceError>> + Send;

    /// All records, oldest first.
    fn fetch_all<E: Record>(
        &self,
    ) -> impl Future<Output = Result<Vec<E>, PersistenceError>> + Send;

    /// Records whose `column` equals `value` (`NULL` matches `NULL`), oldest first.
    fn fetch_by<E: Record>(
        &self,
        column: &str,
        value: SqlValue,
    ) -> impl Future<Output = Result<Vec<E>, PersistenceError>> + Send;

    /// Overwrite the stored row with the same id. Returns `false` if no row matched.
    fn replace<E: Record>(
        &self,
        record: &E,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    /// Returns `false` if no row matched.
    fn remove<E: Record>(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    fn count<E: Record>(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;

    /// Delete every row of the entity's table. Returns the number removed.
    fn truncate<E: Record>(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
}

/// CRUD contract over one entity type.
pub trait Repository<E: Record>: Send + Sync {
    /// Fails with [`PersistenceError::NotFound`] if no entity has this id.
    fn find_by_id(&self, id: &str) -> impl Future<Output = Result<E, PersistenceError>> + Send;

    fn all(&self) -> impl Future<Output = Result<Vec<E>, PersistenceError>> + Send;

    fn find_where<P>(
        &self,
        predicate: P,
    ) -> impl Future<Output = Result<Vec<E>, PersistenceError>> + Send
    where
        P: Fn(&E) -> bool + Send;

    /// Validate and persist a new entity under a fresh id.
    fn create(
        &self,
        attributes: <E as Model>::Attributes,
    ) -> impl Future<Output = Result<E, PersistenceError>> + Send;

    /// Change only the attributes given. Fails with
    /// [`PersistenceError::NotFound`] if no entity has this id.
    fn update(
        &self,
        id: &str,
        attributes: <E as Model>::Attributes,
    ) -> impl Future<Output = Result<E, PersistenceError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}
