//! Email value object.
//!
//! The normalized form (trimmed, lowercase) is the account uniqueness key.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ValidationError;
use crate::config::EMAIL_PATTERN;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// A normalized, syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalize and validate a raw address.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = Self::normalize(raw);
        if EMAIL_RE.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }

    /// Trim surrounding whitespace and lowercase.
    ///
    /// Used on its own for lookups, where a malformed address simply
    /// matches nothing.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::parse("  Foo@Bar.COM \n").unwrap();
        assert_eq!(email.as_str(), "foo@bar.com");
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for raw in ["not-an-email", "", "a@b", "@example.com", "user@.c", "a b@example.com"] {
            assert_eq!(Email::parse(raw), Err(ValidationError::InvalidEmail), "{raw:?}");
        }
    }

    #[test]
    fn test_accepts_common_addresses() {
        for raw in ["user@example.com", "first.last+tag@sub.example.co", "x_y%z@host.io"] {
            assert!(Email::parse(raw).is_ok(), "{raw:?}");
        }
    }
}
