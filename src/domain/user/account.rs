//! Portal account identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UserId, ValidationError};

/// Kind of portal account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Individual learner.
    Student,
    /// Coaching institute account.
    Coaching,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Coaching => write!(f, "coaching"),
        }
    }
}

/// Identity of the account a session acts on behalf of.
///
/// This is the record persisted next to the session token and parsed back
/// on restore, so its serialized shape is part of the storage contract.
/// Parsing applies the same checks as [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Unchecked wire shape of [`User`].
#[derive(Deserialize)]
struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    role: Role,
}

impl TryFrom<UserRecord> for User {
    type Error = ValidationError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::new(record.id, record.name, record.email, record.role)
    }
}

impl User {
    /// Creates a user, rejecting an empty email.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(Self {
            id,
            name: name.into(),
            email,
            role,
        })
    }

    /// Returns the user's name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User::new(
            UserId::new("u-1").unwrap(),
            "Asha",
            "asha@example.com",
            Role::Student,
        )
        .unwrap()
    }

    #[test]
    fn user_new_rejects_empty_email() {
        let result = User::new(UserId::new("u-1").unwrap(), "Asha", " ", Role::Student);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut user = student();
        assert_eq!(user.display_name_or_email(), "Asha");
        user.name = String::new();
        assert_eq!(user.display_name_or_email(), "asha@example.com");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Coaching).unwrap(), "\"coaching\"");
    }

    #[test]
    fn user_json_shape_is_stable() {
        let json = serde_json::to_value(student()).unwrap();
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["role"], "student");
    }

    #[test]
    fn user_with_empty_id_fails_to_parse() {
        let raw = r#"{"id":"","name":"x","email":"x@example.com","role":"student"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }

    #[test]
    fn user_with_blank_email_fails_to_parse() {
        let raw = r#"{"id":"u-1","name":"x","email":"  ","role":"student"}"#;
        let err = serde_json::from_str::<User>(raw).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn user_parses_back_from_its_own_json() {
        let json = serde_json::to_string(&student()).unwrap();
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), student());
    }
}
