use chrono::{Days, NaiveDate};
use daily_domain::word_scramble::scramble;
use daily_domain::{WordScrambleAttributes, WordScramblePuzzle};
use rand::seq::SliceRandom;
use rand::RngCore;

use super::Factory;

/// Words and hints used for generated puzzles.
pub const WORD_BANK: &[(&str, &str)] = &[
    ("planet", "Orbits a star"),
    ("garden", "Where vegetables grow"),
    ("bridge", "Crosses a river"),
    ("candle", "Wax and a wick"),
    ("rocket", "Leaves the atmosphere"),
    ("violin", "Four strings and a bow"),
    ("castle", "A fortified home"),
    ("pepper", "Salt's partner"),
    ("jungle", "Dense tropical forest"),
    ("anchor", "Keeps a ship in place"),
    ("silver", "Second place metal"),
    ("winter", "The coldest season"),
    ("puzzle", "You are solving one"),
    ("harbor", "Where boats shelter"),
    ("lantern", "Portable light"),
    ("compass", "Points north"),
];

/// Puzzles for one game on consecutive dates, starting at `first_date`.
#[derive(Debug, Clone)]
pub struct WordScrambleFactory {
    game_id: String,
    next_date: NaiveDate,
}

impl WordScrambleFactory {
    pub fn new(game_id: impl Into<String>, first_date: NaiveDate) -> Self {
        Self {
            game_id: game_id.into(),
            next_date: first_date,
        }
    }

    fn take_date(&mut self) -> NaiveDate {
        let date = self.next_date;
        self.next_date = date.checked_add_days(Days::new(1)).unwrap_or(date);
        date
    }
}

impl Factory for WordScrambleFactory {
    type Entity = WordScramblePuzzle;

    fn definition(&mut self, rng: &mut dyn RngCore) -> WordScrambleAttributes {
        let (word, hint) = WORD_BANK.choose(rng).copied().unwrap_or(WORD_BANK[0]);
        WordScrambleAttributes::default()
            .game_id(self.game_id.clone())
            .word(word)
            .scrambled(scramble(word, rng))
            .hint(hint.to_string())
            .puzzle_date(self.take_date())
    }
}
