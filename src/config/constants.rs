//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Accounts
// =============================================================================

/// Minimum password length requirement, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Accepted email address shape after normalization
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

// =============================================================================
// Sessions
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime in hours (one year)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Minimum session secret length (security requirement)
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for session expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Name of the cookie carrying the session marker
pub const SESSION_COOKIE_NAME: &str = "session";

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Session token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Database
// =============================================================================

/// Default database location (SQLite file next to the working directory)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://travel_budget.db?mode=rwc";

/// Default size of the storage connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
