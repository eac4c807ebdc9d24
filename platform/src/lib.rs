//! Data layer of the daily games platform: SQLite-backed repositories,
//! entity factories and the database seeder.

pub mod config;
pub mod factory;
pub mod persistence;
pub mod seed;
