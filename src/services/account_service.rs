//! Account service - Registration, authentication and session markers.
//!
//! Depends on the `UserRepository` trait only, so storage can be swapped
//! for a test double.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Email, Password, Registration, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Signed session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Session marker handed to a caller after login
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionToken {
    /// Signed session token (also set as the `session` cookie)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Account operations exposed to the API layer.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validate input and create a new account
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User>;

    /// Check credentials and return the matching account
    async fn authenticate(&self, email: String, password: String) -> AppResult<User>;

    /// Sign a session marker for an authenticated user
    fn issue_session(&self, user: &User) -> AppResult<SessionToken>;

    /// Verify a session marker and extract its claims
    fn verify_session(&self, token: &str) -> AppResult<SessionClaims>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl AccountManager {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        let registration = Registration::parse(&name, &email, &password)?;
        tracing::info!(email = %registration.email, "Registration attempt");

        if self
            .users
            .find_by_email(registration.email.as_str())
            .await?
            .is_some()
        {
            tracing::info!(email = %registration.email, "Account already exists");
            return Err(AppError::DuplicateAccount);
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = self
            .users
            .create(
                registration.name,
                registration.email.into_string(),
                password_hash,
            )
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "Account registered");
        Ok(user)
    }

    async fn authenticate(&self, email: String, password: String) -> AppResult<User> {
        let email = Email::normalize(&email);
        let user = self.users.find_by_email(&email).await?;

        // Verify against a dummy digest when the account is unknown so both
        // failure paths cost the same.
        let stored = user
            .as_ref()
            .map(User::password)
            .unwrap_or_else(Password::dummy);
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = user.id, email = %email, "Login successful");
                Ok(user)
            }
            _ => {
                tracing::warn!(email = %email, "Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_session(&self, user: &User) -> AppResult<SessionToken> {
        let ttl_hours = self.config.session_ttl_hours;
        let lifetime = Duration::try_hours(ttl_hours)
            .ok_or_else(|| AppError::internal(format!("Session TTL out of range: {}h", ttl_hours)))?;
        let expires_in = ttl_hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(|| AppError::internal(format!("Session TTL out of range: {}h", ttl_hours)))?;

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Session expiry out of range"))?;

        let claims = SessionClaims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.session_secret_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Session signing failed: {}", e)))?;

        Ok(SessionToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }

    fn verify_session(&self, token: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use crate::infra::MockUserRepository;

    const SECRET: &str = "unit-test-session-secret-0123456789";

    fn config() -> Config {
        Config::new("sqlite::memory:", SECRET).unwrap()
    }

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: 1,
            name: "Asha".to_string(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> AccountManager {
        AccountManager::new(Arc::new(repo), config())
    }

    #[tokio::test]
    async fn test_register_success_normalizes_and_hashes() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "foo@bar.com")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|name, email, hash| {
                name == "A" && email == "foo@bar.com" && hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|name, email, password_hash| {
                Ok(User {
                    id: 1,
                    name,
                    email,
                    password_hash,
                    created_at: Utc::now(),
                })
            });

        let user = service(repo)
            .register("A".into(), "Foo@Bar.COM".into(), "password1".into())
            .await
            .unwrap();

        assert_eq!(user.email, "foo@bar.com");
        assert!(user.password().verify("password1"));
    }

    #[tokio::test]
    async fn test_register_duplicate_does_not_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "password1"))));
        repo.expect_create().never();

        let result = service(repo)
            .register("B".into(), "FOO@bar.com".into(), "password2".into())
            .await;

        assert!(matches!(result, Err(AppError::DuplicateAccount)));
    }

    #[tokio::test]
    async fn test_register_validation_skips_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();
        let service = service(repo);

        let weak = service
            .register("A".into(), "a@example.com".into(), "short".into())
            .await;
        assert!(matches!(
            weak,
            Err(AppError::Validation(ValidationError::WeakPassword { .. }))
        ));

        let bad_email = service
            .register("A".into(), "not-an-email".into(), "password1".into())
            .await;
        assert!(matches!(
            bad_email,
            Err(AppError::Validation(ValidationError::InvalidEmail))
        ));

        let no_name = service
            .register("  ".into(), "a@example.com".into(), "password1".into())
            .await;
        assert!(matches!(
            no_name,
            Err(AppError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn test_register_insert_race_is_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_, _, _| Err(AppError::DuplicateAccount));

        let result = service(repo)
            .register("A".into(), "a@example.com".into(), "password1".into())
            .await;

        assert!(matches!(result, Err(AppError::DuplicateAccount)));
    }

    #[tokio::test]
    async fn test_register_storage_failure_surfaces() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::Storage(sea_orm::DbErr::Custom("down".into()))));

        let result = service(repo)
            .register("A".into(), "a@example.com".into(), "password1".into())
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_authenticate_normalizes_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "foo@bar.com")
            .returning(|email| Ok(Some(stored_user(email, "password1"))));

        let user = service(repo)
            .authenticate("  FOO@bar.com ".into(), "password1".into())
            .await
            .unwrap();

        assert_eq!(user.email, "foo@bar.com");
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|email| {
            if email == "known@example.com" {
                Ok(Some(stored_user(email, "password1")))
            } else {
                Ok(None)
            }
        });
        let service = service(repo);

        let wrong_password = service
            .authenticate("known@example.com".into(), "password2".into())
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate("nobody@example.com".into(), "password1".into())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_session_round_trip() {
        let service = service(MockUserRepository::new());
        let user = stored_user("a@example.com", "password1");

        let token = service.issue_session(&user).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);

        let claims = service.verify_session(&token.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "a@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_session_from_other_secret_rejected() {
        let user = stored_user("a@example.com", "password1");
        let other = AccountManager::new(
            Arc::new(MockUserRepository::new()),
            Config::new("sqlite::memory:", "another-secret-that-is-long-enough!!").unwrap(),
        );
        let token = other.issue_session(&user).unwrap();

        let result = service(MockUserRepository::new()).verify_session(&token.access_token);
        assert!(matches!(result, Err(AppError::InvalidSession(_))));
    }

    #[test]
    fn test_huge_ttl_is_an_error_not_a_panic() {
        let mut huge = config();
        huge.session_ttl_hours = 3_000_000_000_000;
        let issuer = AccountManager::new(Arc::new(MockUserRepository::new()), huge);

        let result = issuer.issue_session(&stored_user("a@example.com", "password1"));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_expired_session_rejected() {
        let mut expired = config();
        expired.session_ttl_hours = -1;
        let issuer = AccountManager::new(Arc::new(MockUserRepository::new()), expired);
        let token = issuer
            .issue_session(&stored_user("a@example.com", "password1"))
            .unwrap();

        let result = service(MockUserRepository::new()).verify_session(&token.access_token);
        assert!(matches!(result, Err(AppError::InvalidSession(_))));
    }
}
