//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user record held by the store.
//! - Own the named validation rules applied on write and on load.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another user.
//! - `name` and `email` are never blank.
//! - `email` and `created_at` are immutable once the user exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier. Starts at 1.
pub type UserId = u64;

/// Validation errors for user input and filter arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    AgeOutOfRange { age: i64, min: i64, max: i64 },
    InvertedAgeRange { min: i64, max: i64 },
    InvalidAgePolicy { min: i64, max: i64 },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::AgeOutOfRange { age, min, max } => {
                write!(f, "age {age} is outside the accepted range [{min}, {max}]")
            }
            Self::InvertedAgeRange { min, max } => {
                write!(f, "age range minimum ({min}) must be <= maximum ({max})")
            }
            Self::InvalidAgePolicy { min, max } => {
                write!(f, "invalid age policy: min ({min}) must be >= 0 and <= max ({max})")
            }
        }
    }
}

impl Error for UserValidationError {}

/// Accepted age bounds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    min: i64,
    max: i64,
}

impl AgePolicy {
    pub const DEFAULT_MIN: i64 = 0;
    pub const DEFAULT_MAX: i64 = 150;

    /// Creates a policy accepting ages in `[min, max]`.
    ///
    /// # Errors
    /// - `InvalidAgePolicy` when `min` is negative or greater than `max`.
    pub fn new(min: i64, max: i64) -> Result<Self, UserValidationError> {
        if min < 0 || min > max {
            return Err(UserValidationError::InvalidAgePolicy { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Checks one age against the policy bounds.
    pub fn check(&self, age: i64) -> Result<(), UserValidationError> {
        if age < self.min || age > self.max {
            return Err(UserValidationError::AgeOutOfRange {
                age,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Canonical user record.
///
/// Deserialization runs [`User::validate`], so a persisted file with blank
/// names or emails is rejected instead of loaded. Age bounds are an
/// [`AgePolicy`] applied on add only and are not re-checked on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserWire")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across the store, compared case-sensitively.
    pub email: String,
    pub age: i64,
    pub is_active: bool,
    /// Captured once at creation.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates an active user stamped with the current time.
    ///
    /// Age bounds are a store policy and are not checked here.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
    ) -> Result<Self, UserValidationError> {
        let user = Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
            is_active: true,
            created_at: Utc::now(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Validates field-level invariants that hold regardless of store policy.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// Rejects blank names.
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    Ok(())
}

/// Rejects blank emails. Shape is not checked.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }
    Ok(())
}

#[derive(Deserialize)]
struct UserWire {
    id: UserId,
    name: String,
    email: String,
    age: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserWire> for User {
    type Error = UserValidationError;

    fn try_from(wire: UserWire) -> Result<Self, Self::Error> {
        let user = User {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            age: wire.age,
            is_active: wire.is_active,
            created_at: wire.created_at,
        };
        user.validate()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::{AgePolicy, UserValidationError};

    #[test]
    fn default_policy_accepts_bounds_inclusive() {
        let policy = AgePolicy::default();
        assert!(policy.check(0).is_ok());
        assert!(policy.check(150).is_ok());
        assert_eq!(
            policy.check(151).unwrap_err(),
            UserValidationError::AgeOutOfRange {
                age: 151,
                min: 0,
                max: 150
            }
        );
        assert!(policy.check(-1).is_err());
    }

    #[test]
    fn policy_rejects_inverted_or_negative_bounds() {
        assert!(AgePolicy::new(10, 5).is_err());
        assert!(AgePolicy::new(-1, 5).is_err());
        assert!(AgePolicy::new(18, 18).is_ok());
    }
}
