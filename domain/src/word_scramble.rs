//! Daily word-scramble puzzles.

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{initial_timestamps, non_blank, required, whole_seconds, Model, ValidationError};

const MAX_SHUFFLES: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScramblePuzzle {
    pub id: String,
    pub game_id: String,
    pub word: String,
    pub scrambled: String,
    pub hint: Option<String>,
    /// One puzzle per day.
    pub puzzle_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct WordScrambleAttributes {
        game_id: String,
        word: String,
        scrambled: String,
        hint: Option<String>,
        puzzle_date: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

/// Shuffle the letters of `word`. Words with at least two distinct letters
/// never come back unchanged.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let distinct = letters.iter().any(|c| Some(c) != letters.first());
    if !distinct {
        return word.to_string();
    }
    for _ in 0..MAX_SHUFFLES {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
    // Rotating by one always differs when two letters differ.
    let mut chars: Vec<char> = word.chars().collect();
    chars.rotate_left(1);
    chars.into_iter().collect()
}

/// Whether `a` and `b` use exactly the same letters.
pub fn is_anagram(a: &str, b: &str) -> bool {
    let mut left: Vec<char> = a.chars().collect();
    let mut right: Vec<char> = b.chars().collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

impl WordScramblePuzzle {
    fn validate(&self) -> Result<(), ValidationError> {
        non_blank(Self::NAME, "game_id", &self.game_id)?;
        if self.word.is_empty() || !self.word.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "word",
                "must be lowercase ASCII letters",
            ));
        }
        if !is_anagram(&self.word, &self.scrambled) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "scrambled",
                format!("'{}' is not a permutation of the word", self.scrambled),
            ));
        }
        Ok(())
    }
}

impl Model for WordScramblePuzzle {
    type Attributes = WordScrambleAttributes;
    const NAME: &'static str = "WordScramblePuzzle";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_attributes(
        id: String,
        attributes: WordScrambleAttributes,
    ) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let puzzle = Self {
            id,
            game_id: required(Self::NAME, "game_id", attributes.game_id)?,
            word: required(Self::NAME, "word", attributes.word)?,
            scrambled: required(Self::NAME, "scrambled", attributes.scrambled)?,
            hint: attributes.hint.flatten(),
            puzzle_date: required(Self::NAME, "puzzle_date", attributes.puzzle_date)?,
            created_at,
            updated_at,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    fn apply(&mut self, attributes: WordScrambleAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(game_id) = attributes.game_id {
            next.game_id = game_id;
        }
        if let Some(word) = attributes.word {
            next.word = word;
        }
        if let Some(scrambled) = attributes.scrambled {
            next.scrambled = scrambled;
        }
        if let Some(hint) = attributes.hint {
            next.hint = hint;
        }
        if let Some(puzzle_date) = attributes.puzzle_date {
            next.puzzle_date = puzzle_date;
        }
        if let Some(created_at) = attributes.created_at {
            next.created_at = whole_seconds(created_at);
        }
        if let Some(updated_at) = attributes.updated_at {
            next.updated_at = whole_seconds(updated_at);
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = whole_seconds(at);
    }
}
