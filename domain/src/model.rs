//! The [`Model`] trait implemented by every persisted entity, plus the helpers
//! entities share for validation and timestamps.

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::attributes::Attributes;

/// A required attribute was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity}.{field} is required")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}.{field} is invalid: {reason}")]
    Invalid {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    pub fn invalid(entity: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            entity,
            field,
            reason: reason.into(),
        }
    }

    /// The offending field name.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } | Self::Invalid { field, .. } => field,
        }
    }
}

/// An identifiable record with creation and modification timestamps.
///
/// Construction and mutation both go through attribute sets so that every
/// entity is validated the same way regardless of who builds it.
pub trait Model: Clone + std::fmt::Debug + PartialEq + Send + Sync + Unpin + 'static {
    type Attributes: Attributes;

    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Build a validated entity. Fails when a required attribute is absent or
    /// any attribute breaks the entity's rules.
    fn from_attributes(id: String, attributes: Self::Attributes) -> Result<Self, ValidationError>;

    /// Overwrite the fields present in `attributes`, leaving the rest untouched.
    /// On error `self` is left unchanged.
    fn apply(&mut self, attributes: Self::Attributes) -> Result<(), ValidationError>;

    /// Bump `updated_at`.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Current time truncated to whole seconds, the precision timestamps are stored at.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Fresh random identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Deterministic identifier for catalog content that other records refer to by
/// a well-known key (e.g. a game slug).
pub fn stable_id(kind: &str, key: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{kind}:{key}").as_bytes()).to_string()
}

pub(crate) fn required<T>(
    entity: &'static str,
    field: &'static str,
    value: Option<T>,
) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { entity, field })
}

pub(crate) fn non_blank(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid(entity, field, "must not be blank"));
    }
    Ok(())
}

/// Resolve `(created_at, updated_at)` for a new record. A missing `updated_at`
/// follows `created_at` so the pair stays consistent.
pub(crate) fn initial_timestamps(
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let created = created_at.map_or_else(now, whole_seconds);
    (created, updated_at.map_or(created, whole_seconds))
}

/// Drop the sub-second part. Stored timestamps have whole-second precision,
/// so every timestamp is normalised on the way into an entity.
pub(crate) fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn now_has_no_subsecond_component() {
        assert_eq!(now().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn stable_id_is_deterministic_per_kind() {
        assert_eq!(stable_id("game", "word-scramble"), stable_id("game", "word-scramble"));
        assert_ne!(stable_id("game", "word-scramble"), stable_id("badge", "word-scramble"));
        assert!(Uuid::parse_str(&stable_id("game", "x")).is_ok());
    }

    #[test]
    fn updated_at_follows_created_at() {
        let at = now() - chrono::Duration::days(3);
        let (created, updated) = initial_timestamps(Some(at), None);
        assert_eq!(created, at);
        assert_eq!(updated, at);
    }

    #[test]
    fn given_timestamps_are_truncated_to_seconds() {
        let precise = Utc::now().with_nanosecond(123_456_789).unwrap();
        let (created, updated) = initial_timestamps(Some(precise), None);
        assert_eq!(created.timestamp_subsec_nanos(), 0);
        assert_eq!(created.timestamp(), precise.timestamp());
        assert_eq!(updated, created);
    }

    #[test]
    fn missing_field_reports_field() {
        let err = required::<String>("Guest", "token", None).unwrap_err();
        assert_eq!(err.field(), "token");
        assert_eq!(err.to_string(), "Guest.token is required");
    }
}
