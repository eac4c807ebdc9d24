//! Entities of the daily games platform.
//!
//! Each entity implements [`Model`] and comes with a typed attribute set used
//! for creation, updates, factory definitions and overrides.

#[macro_use]
mod attributes;

pub mod badge;
pub mod game;
pub mod game_result;
pub mod guest;
pub mod model;
pub mod user;
pub mod word_scramble;

pub use attributes::Attributes;
pub use badge::{Badge, BadgeAttributes, UserBadge, UserBadgeAttributes};
pub use game::{Game, GameAttributes};
pub use game_result::{GameResult, GameResultAttributes, Player};
pub use guest::{Guest, GuestAttributes, GUEST_TTL_DAYS};
pub use model::{new_id, now, stable_id, Model, ValidationError};
pub use user::{User, UserAttributes};
pub use word_scramble::{WordScrambleAttributes, WordScramblePuzzle};
