//! Games and badges that ship with the platform.
//!
//! Catalog rows get ids derived from their slugs, so units that depend on them
//! can reference a game or badge without looking it up first.

use daily_domain::stable_id;

pub struct CatalogGame {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub max_attempts: i64,
}

pub struct CatalogBadge {
    pub game: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub threshold: i64,
}

pub const WORD_SCRAMBLE: &str = "word-scramble";
pub const DAILY_TRIVIA: &str = "daily-trivia";
pub const MINI_CROSSWORD: &str = "mini-crossword";

pub const GAMES: &[CatalogGame] = &[
    CatalogGame {
        slug: WORD_SCRAMBLE,
        name: "Word Scramble",
        description: "Unscramble the letters to find the word of the day.",
        max_attempts: 5,
    },
    CatalogGame {
        slug: DAILY_TRIVIA,
        name: "Daily Trivia",
        description: "Five questions, one chance each.",
        max_attempts: 1,
    },
    CatalogGame {
        slug: MINI_CROSSWORD,
        name: "Mini Crossword",
        description: "A five by five crossword you can finish over coffee.",
        max_attempts: 3,
    },
];

pub const FIRST_SCRAMBLE: &str = "first-scramble";
pub const SCRAMBLE_STREAK: &str = "scramble-streak-7";

pub const BADGES: &[CatalogBadge] = &[
    CatalogBadge {
        game: WORD_SCRAMBLE,
        slug: FIRST_SCRAMBLE,
        name: "First Scramble",
        description: "Solve your first word scramble.",
        threshold: 1,
    },
    CatalogBadge {
        game: WORD_SCRAMBLE,
        slug: SCRAMBLE_STREAK,
        name: "Week Streak",
        description: "Solve the word scramble seven days in a row.",
        threshold: 7,
    },
    CatalogBadge {
        game: WORD_SCRAMBLE,
        slug: "scramble-master",
        name: "Scramble Master",
        description: "Solve fifty word scrambles.",
        threshold: 50,
    },
    CatalogBadge {
        game: DAILY_TRIVIA,
        slug: "trivia-rookie",
        name: "Trivia Rookie",
        description: "Finish your first trivia round.",
        threshold: 1,
    },
    CatalogBadge {
        game: DAILY_TRIVIA,
        slug: "trivia-buff",
        name: "Trivia Buff",
        description: "Finish thirty trivia rounds.",
        threshold: 30,
    },
    CatalogBadge {
        game: MINI_CROSSWORD,
        slug: "crossword-starter",
        name: "Crossword Starter",
        description: "Complete your first mini crossword.",
        threshold: 1,
    },
];

pub fn game_id(slug: &str) -> String {
    stable_id("game", slug)
}

pub fn badge_id(slug: &str) -> String {
    stable_id("badge", slug)
}
