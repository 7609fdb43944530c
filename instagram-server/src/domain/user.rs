use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const NAME_MAX: usize = 50;
const BIO_MAX: usize = 150;
// would be shadowed by static routes under /api/users
const RESERVED_USERNAMES: [&str; 2] = ["exists", "search"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum Role {
    User,
    Admin,
}

impl Role {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::Unexpected(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
    pub(crate) profile_image: Option<String>,
    pub(crate) role: Role,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let name = normalize_name(&self.name)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            email,
            name,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// Full replacement of the editable profile fields. There is no partial
/// update: both values always overwrite what is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProfileUpdateRequest {
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
}

impl ProfileUpdateRequest {
    /// Trims both fields. A blank bio becomes `None` and clears the stored one.
    /// A blank name is rejected instead of being written over the stored one.
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let bio = match self.bio.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(bio) if bio.chars().count() > BIO_MAX => {
                return Err(DomainError::Validation {
                    field: "bio",
                    message: "must be at most 150 chars",
                });
            }
            Some(bio) => Some(bio.to_string()),
        };
        Ok(Self { name, bio })
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..30 chars",
        });
    }
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if !allowed {
        return Err(DomainError::Validation {
            field: "username",
            message: "may contain only letters, digits, '.' and '_'",
        });
    }
    if RESERVED_USERNAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(username))
    {
        return Err(DomainError::Validation {
            field: "username",
            message: "is reserved",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..50 chars",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        DomainError, ProfileUpdateRequest, RegisterRequest, Role, normalize_email,
        normalize_username,
    };

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn username_rules_are_applied() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("has space").is_err());
        assert!(normalize_username("a".repeat(31).as_str()).is_err());
        assert!(normalize_username("Search").is_err());
        assert_eq!(
            normalize_username("  alice.k_01 ").expect("must be valid"),
            "alice.k_01"
        );
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = RegisterRequest {
            username: "valid_user".to_string(),
            email: "test@example.com".to_string(),
            name: "Valid".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            username: "valid_user".to_string(),
            email: "TEST@example.com".to_string(),
            name: "  Valid User ".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "valid_user");
        assert_eq!(validated.email, "test@example.com");
        assert_eq!(validated.name, "Valid User");
    }

    #[test]
    fn profile_update_blank_bio_clears_it() {
        let req = ProfileUpdateRequest {
            name: " New Name ".to_string(),
            bio: Some("   ".to_string()),
        };
        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.name, "New Name");
        assert_eq!(validated.bio, None);
    }

    #[test]
    fn profile_update_rejects_blank_name_and_long_bio() {
        let blank = ProfileUpdateRequest {
            name: "  ".to_string(),
            bio: None,
        };
        assert_validation_field(blank.validate().expect_err("name required"), "name");

        let long = ProfileUpdateRequest {
            name: "Name".to_string(),
            bio: Some("x".repeat(151)),
        };
        assert_validation_field(long.validate().expect_err("bio too long"), "bio");
    }

    #[test]
    fn role_parses_persisted_text() {
        assert_eq!("USER".parse::<Role>().expect("known role"), Role::User);
        assert_eq!("ADMIN".parse::<Role>().expect("known role"), Role::Admin);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
