//! User profiles: account fields, role, points, and input validation.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::error::ConsoleError;

/// Korean mobile numbers: `01` + one of `0 1 6 7 8 9` + 7-8 digits,
/// validated after hyphens are stripped.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern, always compiles.
    #[allow(clippy::unwrap_used)]
    let re = Regex::new(r"^01[016789]\d{7,8}$").unwrap();
    re
});

/// Minimal email shape check; real deliverability is out of scope.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern, always compiles.
    #[allow(clippy::unwrap_used)]
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re
});

/// Type-safe user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Creates a new random `UserId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `UserId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Console administrator.
    Admin,
    /// Ordinary member.
    Member,
}

impl UserRole {
    /// Database string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Parses the database string form.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on an unknown role string.
    pub fn parse(s: &str) -> Result<Self, ConsoleError> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(ConsoleError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// Account status. Withdrawal is a flag, not a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is live.
    Active,
    /// Account has been withdrawn; retained for history.
    Withdrawn,
}

impl UserStatus {
    /// Database string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parses the database string form.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on an unknown status string.
    pub fn parse(s: &str) -> Result<Self, ConsoleError> {
        match s {
            "active" => Ok(Self::Active),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(ConsoleError::Validation(format!("unknown status: {other}"))),
        }
    }
}

/// A member or administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier.
    pub id: UserId,
    /// Login id, unique across accounts.
    pub login_id: String,
    /// Display name.
    pub name: String,
    /// Mobile number, digits only.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Cumulative point total; drives grade classification.
    pub points: i64,
    /// Account status.
    pub status: UserStatus,
    /// Salted SHA-256 hex digest of the password. Never serialized
    /// outward; DTOs omit it.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Per-user random salt.
    #[serde(skip_serializing)]
    pub password_salt: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Strips hyphens and spaces from a phone number, then validates it.
/// Returns the normalized digits-only form.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] when the normalized number
/// does not match the mobile pattern.
pub fn normalize_phone(raw: &str) -> Result<String, ConsoleError> {
    let normalized: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();
    if PHONE_RE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(ConsoleError::Validation(format!(
            "invalid phone number: {raw:?}"
        )))
    }
}

/// Validates an email address shape.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] on a malformed address.
pub fn validate_email(email: &str) -> Result<(), ConsoleError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ConsoleError::Validation(format!(
            "invalid email address: {email:?}"
        )))
    }
}

/// Computes the salted password digest stored in `password_hash`.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies a candidate password against the stored digest.
#[must_use]
pub fn verify_password(candidate: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(candidate, salt) == stored_hash
}

/// Validates a new password: at least 8 characters, no leading or
/// trailing whitespace.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] when the password is too short
/// or padded with whitespace.
pub fn validate_new_password(password: &str) -> Result<(), ConsoleError> {
    if password.trim() != password {
        return Err(ConsoleError::Validation(
            "password must not start or end with whitespace".to_string(),
        ));
    }
    if password.chars().count() < 8 {
        return Err(ConsoleError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_mobile_numbers() {
        for raw in ["01012345678", "0101234567", "01612345678", "01998765432"] {
            assert!(normalize_phone(raw).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn normalizes_hyphenated_input() {
        let n = normalize_phone("010-1234-5678");
        assert_eq!(n.ok().as_deref(), Some("01012345678"));
    }

    #[test]
    fn rejects_invalid_mobile_numbers() {
        for raw in [
            "01212345678", // 012 is not a mobile prefix
            "0101234",     // too short
            "010123456789", // too long
            "021234567",   // landline
            "abc",
            "",
        ] {
            assert!(normalize_phone(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(validate_email("admin@binibot.kr").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@binibot.kr").is_err());
        assert!(validate_email("nodot@host").is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse", "salt-1");
        assert!(verify_password("correct horse", "salt-1", &hash));
        assert!(!verify_password("wrong", "salt-1", &hash));
        assert!(!verify_password("correct horse", "salt-2", &hash));
    }

    #[test]
    fn new_password_policy() {
        assert!(validate_new_password("longenough").is_ok());
        assert!(validate_new_password("short").is_err());
        assert!(validate_new_password(" padded-pass ").is_err());
    }

    #[test]
    fn role_and_status_parse_round_trip() {
        assert_eq!(UserRole::parse("admin").ok(), Some(UserRole::Admin));
        assert_eq!(
            UserStatus::parse("withdrawn").ok(),
            Some(UserStatus::Withdrawn)
        );
        assert!(UserRole::parse("root").is_err());
        assert!(UserStatus::parse("gone").is_err());
    }
}
