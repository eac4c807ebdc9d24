//! Data access: the entity store boundary, the SQLite store behind it, the
//! generic repository and the per-entity repositories built on top of it.

mod bindings;
mod record;
pub mod repository;
pub mod sqlite;
pub mod traits;

pub use bindings::Repositories;
pub use record::{Record, SqlValue};
pub use repository::{BaseRepository, GameRepository, GuestRepository, UserRepository};
pub use sqlite::{Database, SqliteStore};
pub use traits::{EntityStore, Repository};

use daily_domain::ValidationError;
use sqlx::error::ErrorKind;

/// Which storage rule rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    Referential,
    NotNull,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Unique => "unique",
            Self::Referential => "referential",
            Self::NotNull => "not-null",
            Self::Check => "check",
        };
        f.write_str(label)
    }
}

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{kind} constraint violated on {table}: {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        table: &'static str,
        message: String,
    },
    #[error("Unknown column {column} on {table}")]
    UnknownColumn { table: &'static str, column: String },
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PersistenceError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Classify a driver error raised while touching `table`.
    pub fn from_sqlx(table: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let kind = match db.kind() {
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::Referential),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };
            if let Some(kind) = kind {
                return Self::ConstraintViolation {
                    kind,
                    table,
                    message: db.message().to_string(),
                };
            }
        }
        Self::Database(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The constraint kind, if this is a constraint violation.
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            Self::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_sqlx("(unknown)", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = PersistenceError::not_found("Game", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Game abc not found");
    }

    #[test]
    fn validation_errors_convert() {
        let err: PersistenceError = ValidationError::MissingField {
            entity: "Guest",
            field: "token",
        }
        .into();
        assert!(matches!(err, PersistenceError::Validation(_)));
        assert_eq!(err.constraint(), None);
    }

    #[test]
    fn non_database_errors_are_not_constraints() {
        let err = PersistenceError::from_sqlx("games", sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Database(_)));
    }
}
