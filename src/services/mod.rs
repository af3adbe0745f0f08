//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod account_service;

pub use account_service::{
    AccountManager, AccountService, SessionClaims, SessionToken,
};
