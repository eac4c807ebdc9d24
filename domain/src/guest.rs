//! Anonymous players identified by a token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{initial_timestamps, required, whole_seconds, Model, ValidationError};

/// Days a guest token stays valid after creation.
pub const GUEST_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct GuestAttributes {
        token: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

impl Guest {
    pub fn generate_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Instant after which the token is no longer honoured.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::days(GUEST_TTL_DAYS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Uuid::parse_str(&self.token)
            .map(|_| ())
            .map_err(|e| ValidationError::invalid(Self::NAME, "token", e.to_string()))
    }
}

impl Model for Guest {
    type Attributes = GuestAttributes;
    const NAME: &'static str = "Guest";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_attributes(id: String, attributes: GuestAttributes) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let guest = Self {
            id,
            token: required(Self::NAME, "token", attributes.token)?,
            created_at,
            updated_at,
        };
        guest.validate()?;
        Ok(guest)
    }

    fn apply(&mut self, attributes: GuestAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(token) = attributes.token {
            next.token = token;
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
