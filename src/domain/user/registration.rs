//! Registration payloads.
//!
//! Students and coaching institutes sign up with disjoint field sets. The
//! payload is a tagged variant keyed on the account role so a student
//! record can never carry institute fields and vice versa.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::domain::foundation::ValidationError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fields collected from an individual learner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub date_of_birth: Option<String>,
    pub grade: Option<String>,
    pub school: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub subjects: Option<String>,
    pub goals: Option<String>,
}

/// Fields collected from a coaching institute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingProfile {
    pub institute_name: String,
    pub experience: Option<String>,
    pub specialization: Option<String>,
    pub phone: Option<String>,
    pub institute_address: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<u16>,
    pub total_students: Option<u32>,
    pub facilities: Option<String>,
    pub teaching_methods: Option<String>,
    pub success_rate: Option<String>,
    pub owner_name: Option<String>,
    pub owner_qualification: Option<String>,
}

/// Role-specific part of a registration, discriminated by `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RegistrationProfile {
    Student(StudentProfile),
    Coaching(CoachingProfile),
}

impl RegistrationProfile {
    /// Returns the account role this profile registers.
    pub fn role(&self) -> Role {
        match self {
            RegistrationProfile::Student(_) => Role::Student,
            RegistrationProfile::Coaching(_) => Role::Coaching,
        }
    }
}

/// A validated sign-up request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    password: SecretString,
    pub profile: RegistrationProfile,
}

impl Registration {
    /// Validates and builds a registration.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank name, email or institute name
    /// - `InvalidFormat` for an email without `@` or mismatched passwords
    /// - `OutOfRange` for a password shorter than [`MIN_PASSWORD_LEN`]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        profile: RegistrationProfile,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        let password = password.into();
        let confirm_password = confirm_password.into();

        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if password != confirm_password {
            return Err(ValidationError::invalid_format(
                "confirm_password",
                "passwords do not match",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::out_of_range(
                "password",
                MIN_PASSWORD_LEN as i32,
                i32::MAX,
                password.chars().count() as i32,
            ));
        }
        if let RegistrationProfile::Coaching(coaching) = &profile {
            if coaching.institute_name.trim().is_empty() {
                return Err(ValidationError::empty_field("institute_name"));
            }
        }

        Ok(Self {
            name,
            email,
            password: SecretString::new(password),
            profile,
        })
    }

    /// Returns the account role being registered.
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Exposes the password (for submitting the request).
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coaching(name: &str) -> RegistrationProfile {
        RegistrationProfile::Coaching(CoachingProfile {
            institute_name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn student_registration_is_accepted() {
        let reg = Registration::new(
            "Ravi",
            "ravi@example.com",
            "secret1",
            "secret1",
            RegistrationProfile::Student(StudentProfile::default()),
        )
        .unwrap();
        assert_eq!(reg.role(), Role::Student);
        assert_eq!(reg.password(), "secret1");
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let result = Registration::new(
            "Ravi",
            "ravi@example.com",
            "secret1",
            "secret2",
            RegistrationProfile::Student(StudentProfile::default()),
        );
        assert!(matches!(
            result,
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "confirm_password"
        ));
    }

    #[test]
    fn short_password_is_rejected() {
        let result = Registration::new(
            "Ravi",
            "ravi@example.com",
            "abc",
            "abc",
            RegistrationProfile::Student(StudentProfile::default()),
        );
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn email_without_at_is_rejected() {
        let result = Registration::new(
            "Ravi",
            "ravi.example.com",
            "secret1",
            "secret1",
            RegistrationProfile::Student(StudentProfile::default()),
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn coaching_requires_institute_name() {
        let result = Registration::new("Owner", "o@example.com", "secret1", "secret1", coaching(" "));
        assert!(matches!(
            result,
            Err(ValidationError::EmptyField { ref field }) if field == "institute_name"
        ));
    }

    #[test]
    fn profile_serializes_with_role_tag() {
        let json = serde_json::to_value(coaching("Apex Academy")).unwrap();
        assert_eq!(json["role"], "coaching");
        assert_eq!(json["instituteName"], "Apex Academy");
        assert!(json.get("school").is_none());
    }

    #[test]
    fn profile_deserializes_by_role_tag() {
        let raw = r#"{"role":"student","school":"Central High"}"#;
        let profile: RegistrationProfile = serde_json::from_str(raw).unwrap();
        match profile {
            RegistrationProfile::Student(s) => assert_eq!(s.school.as_deref(), Some("Central High")),
            _ => panic!("Expected student profile"),
        }
    }

    #[test]
    fn password_is_not_in_debug_output() {
        let reg = Registration::new(
            "Ravi",
            "ravi@example.com",
            "hunter22",
            "hunter22",
            RegistrationProfile::Student(StudentProfile::default()),
        )
        .unwrap();
        assert!(!format!("{:?}", reg).contains("hunter22"));
    }
}
