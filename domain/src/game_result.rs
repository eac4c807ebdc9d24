//! A single play of a game, owned by either a user or a guest.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{initial_timestamps, non_blank, required, whole_seconds, Model, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: String,
    pub game_id: String,
    pub user_id: Option<String>,
    pub guest_id: Option<String>,
    pub puzzle_id: Option<String>,
    pub score: i64,
    pub completed: bool,
    pub played_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct GameResultAttributes {
        game_id: String,
        user_id: Option<String>,
        guest_id: Option<String>,
        puzzle_id: Option<String>,
        score: i64,
        completed: bool,
        played_on: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

/// Who a result belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Player {
    User(String),
    Guest(String),
}

impl GameResultAttributes {
    pub fn for_player(mut self, player: Player) -> Self {
        match player {
            Player::User(id) => {
                self.user_id = Some(Some(id));
                self.guest_id = Some(None);
            }
            Player::Guest(id) => {
                self.user_id = Some(None);
                self.guest_id = Some(Some(id));
            }
        }
        self
    }
}

impl GameResult {
    pub fn player(&self) -> Option<Player> {
        match (&self.user_id, &self.guest_id) {
            (Some(user), None) => Some(Player::User(user.clone())),
            (None, Some(guest)) => Some(Player::Guest(guest.clone())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_blank(Self::NAME, "game_id", &self.game_id)?;
        match (&self.user_id, &self.guest_id) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::invalid(
                    Self::NAME,
                    "guest_id",
                    "a result belongs to a user or a guest, not both",
                ))
            }
            (None, None) => {
                return Err(ValidationError::MissingField {
                    entity: Self::NAME,
                    field: "user_id",
                })
            }
            _ => {}
        }
        if self.score < 0 {
            return Err(ValidationError::invalid(
                Self::NAME,
                "score",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

impl Model for GameResult {
    type Attributes = GameResultAttributes;
    const NAME: &'static str = "GameResult";

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
        attributes: GameResultAttributes,
    ) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let result = Self {
            id,
            game_id: required(Self::NAME, "game_id", attributes.game_id)?,
            user_id: attributes.user_id.flatten(),
            guest_id: attributes.guest_id.flatten(),
            puzzle_id: attributes.puzzle_id.flatten(),
            score: attributes.score.unwrap_or(0),
            completed: attributes.completed.unwrap_or(false),
            played_on: attributes
                .played_on
                .unwrap_or_else(|| created_at.date_naive()),
            created_at,
            updated_at,
        };
        result.validate()?;
        Ok(result)
    }

    fn apply(&mut self, attributes: GameResultAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(game_id) = attributes.game_id {
            next.game_id = game_id;
        }
        if let Some(user_id) = attributes.user_id {
            next.user_id = user_id;
        }
        if let Some(guest_id) = attributes.guest_id {
            next.guest_id = guest_id;
        }
        if let Some(puzzle_id) = attributes.puzzle_id {
            next.puzzle_id = puzzle_id;
        }
        if let Some(score) = attributes.score {
            next.score = score;
        }
        if let Some(completed) = attributes.completed {
            next.completed = completed;
        }
        if let Some(played_on) = attributes.played_on {
            next.played_on = played_on;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_exactly_one_owner() {
        let base = GameResultAttributes::default().game_id("g");
        let err = GameResult::from_attributes("r".into(), base.clone()).unwrap_err();
        assert_eq!(err.field(), "user_id");

        let mut both = base.clone().for_player(Player::User("u".into()));
        both.guest_id = Some(Some("x".into()));
        let err = GameResult::from_attributes("r".into(), both).unwrap_err();
        assert_eq!(err.field(), "guest_id");

        let ok = GameResult::from_attributes("r".into(), base.for_player(Player::Guest("x".into())))
            .unwrap();
        assert_eq!(ok.player(), Some(Player::Guest("x".into())));
    }

    #[test]
    fn played_on_defaults_to_creation_day() {
        let created = crate::model::now();
        let attrs = GameResultAttributes::default()
            .game_id("g")
            .created_at(created)
            .for_player(Player::User("u".into()));
        let result = GameResult::from_attributes("r".into(), attrs).unwrap();
        assert_eq!(result.played_on, created.date_naive());
        assert_eq!(result.score, 0);
        assert!(!result.completed);
    }

    #[test]
    fn negative_scores_are_rejected() {
        let attrs = GameResultAttributes::default()
            .game_id("g")
            .score(-1)
            .for_player(Player::User("u".into()));
        assert_eq!(
            GameResult::from_attributes("r".into(), attrs).unwrap_err().field(),
            "score"
        );
    }
}
