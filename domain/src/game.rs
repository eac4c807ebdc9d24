//! Games offered on the platform. Games are catalog data and belong to nobody.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{initial_timestamps, non_blank, required, whole_seconds, Model, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Free-form per-game settings. Always a JSON object.
    pub config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct GameAttributes {
        slug: String,
        name: String,
        description: String,
        config: Value,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

/// Lowercase ASCII words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

impl Game {
    /// Look up an integer setting from `config`.
    pub fn setting(&self, key: &str) -> Option<i64> {
        self.config.get(key).and_then(Value::as_i64)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_slug(&self.slug) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "slug",
                format!("'{}' is not kebab-case", self.slug),
            ));
        }
        non_blank(Self::NAME, "name", &self.name)?;
        if !self.config.is_object() {
            return Err(ValidationError::invalid(
                Self::NAME,
                "config",
                "must be a JSON object",
            ));
        }
        Ok(())
    }
}

impl Model for Game {
    type Attributes = GameAttributes;
    const NAME: &'static str = "Game";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_attributes(id: String, attributes: GameAttributes) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let game = Self {
            id,
            slug: required(Self::NAME, "slug", attributes.slug)?,
            name: required(Self::NAME, "name", attributes.name)?,
            description: attributes.description.unwrap_or_default(),
            config: attributes
                .config
                .unwrap_or_else(|| Value::Object(Default::default())),
            created_at,
            updated_at,
        };
        game.validate()?;
        Ok(game)
    }

    fn apply(&mut self, attributes: GameAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(slug) = attributes.slug {
            next.slug = slug;
        }
        if let Some(name) = attributes.name {
            next.name = name;
        }
        if let Some(description) = attributes.description {
            next.description = description;
        }
        if let Some(config) = attributes.config {
            next.config = config;
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
    use serde_json::json;

    fn attrs() -> GameAttributes {
        GameAttributes::default()
            .slug("word-scramble")
            .name("Word Scramble")
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("word-scramble"));
        assert!(is_valid_slug("mini2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("Upper"));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let game = Game::from_attributes("g".into(), attrs()).unwrap();
        assert_eq!(game.description, "");
        assert_eq!(game.config, json!({}));
    }

    #[test]
    fn config_must_be_an_object() {
        let err = Game::from_attributes("g".into(), attrs().config(json!([1, 2]))).unwrap_err();
        assert_eq!(err.field(), "config");
    }

    #[test]
    fn setting_reads_integers() {
        let game =
            Game::from_attributes("g".into(), attrs().config(json!({"max_attempts": 5}))).unwrap();
        assert_eq!(game.setting("max_attempts"), Some(5));
        assert_eq!(game.setting("missing"), None);
    }
}
