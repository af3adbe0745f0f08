//! Domain-level errors.
//!
//! These errors represent business rule violations. They are independent
//! of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Registration input that breaks an account rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Name cannot be empty")]
    EmptyName,
}

impl ValidationError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::WeakPassword { .. } => "WEAK_PASSWORD",
            ValidationError::EmptyName => "EMPTY_NAME",
        }
    }
}

/// Trip parameters that cannot be turned into a budget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a whole number")]
    NotNumeric { field: &'static str },

    #[error("budget total is too large to compute")]
    Overflow,
}
