//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_SESSION_TTL_HOURS,
    MAX_SESSION_TTL_HOURS, MIN_SESSION_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    session_secret: String,
    pub session_ttl_hours: i64,
    pub session_cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything except the
    /// storage location and the session secret.
    ///
    /// # Errors
    /// Returns a configuration error if the secret is shorter than
    /// `MIN_SESSION_SECRET_LENGTH`.
    pub fn new(database_url: impl Into<String>, session_secret: impl Into<String>) -> AppResult<Self> {
        let session_secret = session_secret.into();
        if session_secret.chars().count() < MIN_SESSION_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            session_secret,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            session_cookie_secure: false,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// There is no fallback secret: `SESSION_SECRET` must be supplied.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    ///
    /// A variable that is set but does not parse is an error, never a
    /// silent default.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let session_secret = lookup("SESSION_SECRET")
            .ok_or_else(|| AppError::config("SESSION_SECRET environment variable must be set"))?;
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mut config = Self::new(database_url, session_secret)?;

        config.database_max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);
        config.session_ttl_hours =
            parse_var(&lookup, "SESSION_TTL_HOURS")?.unwrap_or(DEFAULT_SESSION_TTL_HOURS);
        config.session_cookie_secure =
            parse_var(&lookup, "SESSION_COOKIE_SECURE")?.unwrap_or(false);

        if !(1..=MAX_SESSION_TTL_HOURS).contains(&config.session_ttl_hours) {
            return Err(AppError::config(format!(
                "SESSION_TTL_HOURS must be between 1 and {}",
                MAX_SESSION_TTL_HOURS
            )));
        }

        Ok(config)
    }

    /// Get session secret bytes for token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> AppResult<Option<T>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("sqlite::memory:", "too-short");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::new("sqlite::memory:", "a".repeat(MIN_SESSION_SECRET_LENGTH)).unwrap();

        assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.database_max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);
        assert!(!config.session_cookie_secure);
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const SECRET: &str = "a-session-secret-that-is-long-enough";

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "12"),
            ("SESSION_COOKIE_SECURE", "true"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.session_ttl_hours, 12);
        assert!(config.session_cookie_secure);
        assert_eq!(config.database_max_connections, 2);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_ttl_out_of_range_rejected() {
        for ttl in ["0", "-5", "3000000000000"] {
            let result = Config::from_lookup(lookup(&[
                ("SESSION_SECRET", SECRET),
                ("SESSION_TTL_HOURS", ttl),
            ]));
            assert!(matches!(result, Err(AppError::Config(_))), "ttl {}", ttl);
        }
    }

    #[test]
    fn test_unparsable_values_rejected() {
        let ttl = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "a day"),
        ]));
        assert!(matches!(ttl, Err(AppError::Config(_))));

        let secure = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("SESSION_COOKIE_SECURE", "1"),
        ]));
        assert!(matches!(secure, Err(AppError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret = "s".repeat(40);
        let config = Config::new("sqlite::memory:", secret.clone()).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains(&secret));
        assert!(debug.contains("[REDACTED]"));
    }
}
