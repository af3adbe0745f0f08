//! Session middleware and per-request session context.
//!
//! Every request gets a `SessionContext`. It carries the authenticated user
//! when a valid session marker arrives in the `session` cookie or an
//! `Authorization: Bearer` header, and is anonymous otherwise.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, SESSION_COOKIE_NAME};
use crate::errors::AppError;
use crate::services::SessionClaims;

/// Authenticated user resolved from a session marker
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct CurrentUser {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Request-scoped session state
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    user: Option<CurrentUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }
}

/// Resolve the session marker, if any, into a `SessionContext`.
///
/// Never rejects: markers that fail verification are skipped, and with no
/// valid marker the context is anonymous. Routes that need a user extract
/// `CurrentUser` instead.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = session_tokens(request.headers())
        .into_iter()
        .find_map(|token| match state.account_service.verify_session(&token) {
            Ok(claims) => Some(CurrentUser::from(claims)),
            Err(e) => {
                tracing::debug!("Ignoring session marker: {}", e);
                None
            }
        });

    let context = match user {
        Some(user) => SessionContext::authenticated(user),
        None => SessionContext::anonymous(),
    };
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Candidate markers in verification order: Bearer header, then cookie.
fn session_tokens(headers: &HeaderMap) -> Vec<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string);

    let cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    bearer.into_iter().chain(cookie).collect()
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(|context| context.user().cloned())
            .ok_or(AppError::Unauthorized)
    }
}
