//! SQLite-backed entity store.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and multiple concurrent readers.
//! - **Foreign keys enabled**: enforced at the connection level, which is what
//!   turns out-of-order seeding into referential constraint violations.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called.
//!
//! ## Store
//!
//! [`SqliteStore`] holds the pool and implements
//! [`EntityStore`](crate::persistence::EntityStore) for every
//! [`Record`](crate::persistence::Record):
//!
//! | Entity | Table |
//! |--------|-------|
//! | `Guest` | `guests` |
//! | `Game` | `games` |
//! | `User` | `users` |
//! | `Badge` | `badges` |
//! | `WordScramblePuzzle` | `word_scramble_puzzles` |
//! | `UserBadge` | `user_badges` |
//! | `GameResult` | `game_results` |
//!
//! Timestamps, dates and JSON columns go through the helpers in [`helpers`].

mod database;
pub(crate) mod helpers;
#[cfg(test)]
mod integration_tests;
mod records;
mod store;

pub use database::Database;
pub use store::SqliteStore;
