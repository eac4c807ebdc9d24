//! Registered users and their credentials.

use chrono::{DateTime, Utc};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{initial_timestamps, non_blank, required, whole_seconds, Model, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing, default)]
    pub remember_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

attribute_set! {
    pub struct UserAttributes {
        name: String,
        email: String,
        password_hash: String,
        email_verified_at: Option<DateTime<Utc>>,
        remember_token: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }
}

impl UserAttributes {
    /// Hash `plain` with a fresh salt and store it as the password hash.
    pub fn password(self, plain: &str) -> Result<Self, ValidationError> {
        Ok(self.password_hash(hash_password(plain)?))
    }

    /// Mark the email address as unverified.
    pub fn unverified(mut self) -> Self {
        self.email_verified_at = Some(None);
        self
    }
}

/// Argon2id hash of `plain` with a random salt, as a PHC string.
pub fn hash_password(plain: &str) -> Result<String, ValidationError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ValidationError::invalid(User::NAME, "password_hash", e.to_string()))
}

/// Check `plain` against a stored PHC string. Unparsable hashes never match.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|hash| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Generate a random remember-me token.
pub fn remember_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    pub fn check_password(&self, plain: &str) -> bool {
        verify_password(plain, &self.password_hash)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_blank(Self::NAME, "name", &self.name)?;
        if !is_valid_email(&self.email) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "email",
                format!("'{}' is not an email address", self.email),
            ));
        }
        non_blank(Self::NAME, "password_hash", &self.password_hash)?;
        if let Err(e) = PasswordHash::new(&self.password_hash) {
            return Err(ValidationError::invalid(
                Self::NAME,
                "password_hash",
                e.to_string(),
            ));
        }
        Ok(())
    }
}

impl Model for User {
    type Attributes = UserAttributes;
    const NAME: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_attributes(id: String, attributes: UserAttributes) -> Result<Self, ValidationError> {
        let (created_at, updated_at) =
            initial_timestamps(attributes.created_at, attributes.updated_at);
        let user = Self {
            id,
            name: required(Self::NAME, "name", attributes.name)?,
            email: required(Self::NAME, "email", attributes.email)?,
            password_hash: required(Self::NAME, "password_hash", attributes.password_hash)?,
            email_verified_at: attributes.email_verified_at.flatten().map(whole_seconds),
            remember_token: attributes.remember_token.flatten(),
            created_at,
            updated_at,
        };
        user.validate()?;
        Ok(user)
    }

    fn apply(&mut self, attributes: UserAttributes) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = attributes.name {
            next.name = name;
        }
        if let Some(email) = attributes.email {
            next.email = email;
        }
        if let Some(password_hash) = attributes.password_hash {
            next.password_hash = password_hash;
        }
        if let Some(email_verified_at) = attributes.email_verified_at {
            next.email_verified_at = email_verified_at.map(whole_seconds);
        }
        if let Some(remember_token) = attributes.remember_token {
            next.remember_token = remember_token;
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

    fn attrs() -> UserAttributes {
        UserAttributes::default()
            .name("Test User")
            .email("test@example.com")
            .password("password")
            .unwrap()
    }

    #[test]
    fn password_round_trip() {
        let user = User::from_attributes("u".into(), attrs()).unwrap();
        assert!(user.check_password("password"));
        assert!(!user.check_password("Password"));
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(
            hash_password("password").unwrap(),
            hash_password("password").unwrap()
        );
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("password", "plain-text"));
        assert!(!verify_password("password", "sha256$salt$abc"));
    }

    #[test]
    fn non_phc_hash_is_rejected() {
        let err =
            User::from_attributes("u".into(), attrs().password_hash("not-a-hash")).unwrap_err();
        assert_eq!(err.field(), "password_hash");
    }

    #[test]
    fn email_is_required_and_checked() {
        let mut missing = attrs();
        missing.email = None;
        let err = User::from_attributes("u".into(), missing).unwrap_err();
        assert_eq!(err.field(), "email");

        let err = User::from_attributes("u".into(), attrs().email("nobody")).unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn unverified_clears_verification() {
        let verified = attrs().email_verified_at(Some(crate::model::now()));
        let user = User::from_attributes("u".into(), verified.clone()).unwrap();
        assert!(user.is_verified());

        let user = User::from_attributes("u".into(), verified.unverified()).unwrap();
        assert!(!user.is_verified());
    }

    #[test]
    fn credentials_are_not_serialized() {
        let user = User::from_attributes("u".into(), attrs()).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("remember_token").is_none());
        assert_eq!(json["email"], "test@example.com");
    }
}
