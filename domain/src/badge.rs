//! Achievements attached to a game, and the record of a user earning one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::is_valid_slug;
use crate::model::{
    initial_timestamps, non_blank, now, required, whole_seconds, Model, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub game_id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Number of qualifying plays needed to earn the badge.
    pub threshold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct BadgeAttributes {
        game_id: String,
        slug: String,
        name: String,
        description: String,
        threshold: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

impl Badge {
    pub fn is_earned_by(&self, qualifying_plays: i64) -> bool {
        qualifying_plays >= self.threshold
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_blank(Self::NAME, "game_id", &self.game_id)?;
        if !is_valid_slug(&self.slug) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "slug",
                format!("'{}' is not kebab-case", self.slug),
            ));
        }
        non_blank(Self::NAME, "name", &self.name)?;
        if self.threshold < 1 {
            return Err(ValidationError::invalid(
                Self::NAME,
                "threshold",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Model for Badge {
    type Attributes = BadgeAttributes;
    const NAME: &'static str = "Badge";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_attributes(id: String, attributes: BadgeAttributes) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let badge = Self {
            id,
            game_id: required(Self::NAME, "game_id", attributes.game_id)?,
            slug: required(Self::NAME, "slug", attributes.slug)?,
            name: required(Self::NAME, "name", attributes.name)?,
            description: attributes.description.unwrap_or_default(),
            threshold: attributes.threshold.unwrap_or(1),
            created_at,
            updated_at,
        };
        badge.validate()?;
        Ok(badge)
    }

    fn apply(&mut self, attributes: BadgeAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(game_id) = attributes.game_id {
            next.game_id = game_id;
        }
        if let Some(slug) = attributes.slug {
            next.slug = slug;
        }
        if let Some(name) = attributes.name {
            next.name = name;
        }
        if let Some(description) = attributes.description {
            next.description = description;
        }
        if let Some(threshold) = attributes.threshold {
            next.threshold = threshold;
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

/// A badge awarded to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBadge {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub awarded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct UserBadgeAttributes {
        user_id: String,
        badge_id: String,
        awarded_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

impl UserBadge {
    fn validate(&self) -> Result<(), ValidationError> {
        non_blank(Self::NAME, "user_id", &self.user_id)?;
        non_blank(Self::NAME, "badge_id", &self.badge_id)
    }
}

impl Model for UserBadge {
    type Attributes = UserBadgeAttributes;
    const NAME: &'static str = "UserBadge";

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
        attributes: UserBadgeAttributes,
    ) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let award = Self {
            id,
            user_id: required(Self::NAME, "user_id", attributes.user_id)?,
            badge_id: required(Self::NAME, "badge_id", attributes.badge_id)?,
            awarded_at: attributes.awarded_at.map_or_else(now, whole_seconds),
            created_at,
            updated_at,
        };
        award.validate()?;
        Ok(award)
    }

    fn apply(&mut self, attributes: UserBadgeAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(user_id) = attributes.user_id {
            next.user_id = user_id;
        }
        if let Some(badge_id) = attributes.badge_id {
            next.badge_id = badge_id;
        }
        if let Some(awarded_at) = attributes.awarded_at {
            next.awarded_at = whole_seconds(awarded_at);
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

    fn attrs() -> BadgeAttributes {
        BadgeAttributes::default()
            .game_id("game-1")
            .slug("first-scramble")
            .name("First Scramble")
    }

    #[test]
    fn threshold_defaults_to_one() {
        let badge = Badge::from_attributes("b".into(), attrs()).unwrap();
        assert_eq!(badge.threshold, 1);
        assert!(badge.is_earned_by(1));
        assert!(!badge.is_earned_by(0));
    }

    #[test]
    fn threshold_must_be_positive() {
        let err = Badge::from_attributes("b".into(), attrs().threshold(0)).unwrap_err();
        assert_eq!(err.field(), "threshold");
    }

    #[test]
    fn game_is_required() {
        let mut no_game = attrs();
        no_game.game_id = None;
        let err = Badge::from_attributes("b".into(), no_game).unwrap_err();
        assert_eq!(err.field(), "game_id");
    }

    #[test]
    fn award_defaults_to_now() {
        let before = now();
        let award = UserBadge::from_attributes(
            "ub".into(),
            UserBadgeAttributes::default().user_id("u").badge_id("b"),
        )
        .unwrap();
        assert!(award.awarded_at >= before);
    }
}
