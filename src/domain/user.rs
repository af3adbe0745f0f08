//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::email::Email;
use super::error::ValidationError;
use super::password::Password;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Stored credential as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }
}

/// Registration input that passed every account rule.
///
/// The password is still plain text here; hashing happens only once the
/// email is known to be free.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: Email,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Registration {
    /// Normalize and validate registration input.
    ///
    /// Rules are checked in a fixed order: email, password, name. The
    /// first failure is returned.
    pub fn parse(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = Email::parse(email)?;
        Password::check_strength(password)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User display name
    #[schema(example = "Asha Rao")]
    pub name: String,
    /// Normalized email address
    #[schema(example = "asha@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_normalizes() {
        let reg = Registration::parse("  Asha  ", " Foo@Bar.COM", "password1").unwrap();

        assert_eq!(reg.name, "Asha");
        assert_eq!(reg.email.as_str(), "foo@bar.com");
        assert_eq!(reg.password, "password1");
    }

    #[test]
    fn test_registration_rule_order() {
        // Every rule broken: email is reported first
        assert_eq!(
            Registration::parse("", "not-an-email", "short").unwrap_err(),
            ValidationError::InvalidEmail
        );
        // Email fine: password next
        assert_eq!(
            Registration::parse("", "a@example.com", "short").unwrap_err(),
            ValidationError::WeakPassword { min: 8 }
        );
        // Only the name is wrong
        assert_eq!(
            Registration::parse("   ", "a@example.com", "password1").unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn test_password_not_trimmed() {
        // Surrounding spaces count toward the length
        assert!(Registration::parse("A", "a@example.com", "  pass  ").is_ok());
    }

    #[test]
    fn test_user_response_hides_hash() {
        let user = User {
            id: 7,
            name: "A".into(),
            email: "a@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));

        let response = UserResponse::from(user);
        assert_eq!(response.id, 7);
    }
}
