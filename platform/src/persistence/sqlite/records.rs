//! [`Record`] implementations: one table per domain entity.

use daily_domain::{Badge, Game, GameResult, Guest, User, UserBadge, WordScramblePuzzle};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::helpers::{
    date, encode_date, encode_json, encode_optional_timestamp, encode_timestamp, json,
    optional_timestamp, timestamp,
};
use crate::persistence::{Record, SqlValue};

impl Record for Guest {
    const TABLE: &'static str = "guests";
    const COLUMNS: &'static [&'static str] = &["id", "token", "created_at", "updated_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.token).into(),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            token: row.try_get("token")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for Game {
    const TABLE: &'static str = "games";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "slug",
        "name",
        "description",
        "config",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.slug).into(),
            (&self.name).into(),
            (&self.description).into(),
            encode_json(&self.config),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            config: json(row, "config")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "password_hash",
        "email_verified_at",
        "remember_token",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.name).into(),
            (&self.email).into(),
            (&self.password_hash).into(),
            encode_optional_timestamp(&self.email_verified_at),
            self.remember_token.clone().into(),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            email_verified_at: optional_timestamp(row, "email_verified_at")?,
            remember_token: row.try_get("remember_token")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for Badge {
    const TABLE: &'static str = "badges";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "game_id",
        "slug",
        "name",
        "description",
        "threshold",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.game_id).into(),
            (&self.slug).into(),
            (&self.name).into(),
            (&self.description).into(),
            self.threshold.into(),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            game_id: row.try_get("game_id")?,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            threshold: row.try_get("threshold")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for WordScramblePuzzle {
    const TABLE: &'static str = "word_scramble_puzzles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "game_id",
        "word",
        "scrambled",
        "hint",
        "puzzle_date",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.game_id).into(),
            (&self.word).into(),
            (&self.scrambled).into(),
            self.hint.clone().into(),
            encode_date(&self.puzzle_date),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            game_id: row.try_get("game_id")?,
            word: row.try_get("word")?,
            scrambled: row.try_get("scrambled")?,
            hint: row.try_get("hint")?,
            puzzle_date: date(row, "puzzle_date")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for UserBadge {
    const TABLE: &'static str = "user_badges";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "badge_id",
        "awarded_at",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.user_id).into(),
            (&self.badge_id).into(),
            encode_timestamp(&self.awarded_at),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            badge_id: row.try_get("badge_id")?,
            awarded_at: timestamp(row, "awarded_at")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl Record for GameResult {
    const TABLE: &'static str = "game_results";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "game_id",
        "user_id",
        "guest_id",
        "puzzle_id",
        "score",
        "completed",
        "played_on",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            (&self.id).into(),
            (&self.game_id).into(),
            self.user_id.clone().into(),
            self.guest_id.clone().into(),
            self.puzzle_id.clone().into(),
            self.score.into(),
            self.completed.into(),
            encode_date(&self.played_on),
            encode_timestamp(&self.created_at),
            encode_timestamp(&self.updated_at),
        ]
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            game_id: row.try_get("game_id")?,
            user_id: row.try_get("user_id")?,
            guest_id: row.try_get("guest_id")?,
            puzzle_id: row.try_get("puzzle_id")?,
            score: row.try_get("score")?,
            completed: row.try_get("completed")?,
            played_on: date(row, "played_on")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}
