//! Account and session handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{CurrentUser, SessionContext};
use crate::api::AppState;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::SessionToken;
use crate::types::MessageResponse;

/// User registration request
///
/// Missing fields are treated as empty and rejected by the account rules.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    #[validate(length(max = 100, message = "Name is too long"))]
    #[schema(example = "Asha Rao")]
    pub name: String,
    /// Email address (case-insensitive)
    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long"))]
    #[schema(example = "asha@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long"))]
    #[schema(example = "password1", min_length = 8)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long"))]
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long"))]
    #[schema(example = "password1")]
    pub password: String,
}

/// Registration outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "Registration successful! Please log in.")]
    pub message: String,
    pub user: UserResponse,
}

/// Login outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Welcome back, Asha Rao!")]
    pub message: String,
    pub user: UserResponse,
    pub session: SessionToken,
}

/// Current session
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: CurrentUser,
}

/// Create account and session routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid email, weak password or empty name"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state
        .account_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful! Please log in.".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// Log in and receive a session marker
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; `session` cookie set", body = LoginResponse),
        (status = 401, description = "Incorrect email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let user = state
        .account_service
        .authenticate(payload.email, payload.password)
        .await?;
    let session = state.account_service.issue_session(&user)?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session_cookie_secure);

    let body = LoginResponse {
        message: format!("Welcome back, {}!", user.name),
        user: UserResponse::from(user),
        session,
    };

    Ok((jar.add(cookie), Json(body)))
}

/// Clear the session marker
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(session: SessionContext, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    if let Some(user) = session.user() {
        tracing::info!(user_id = user.id, "User logged out");
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, Json(MessageResponse::new("Logged out successfully.")))
}

/// Get the user behind the current session
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Authentication",
    responses(
        (status = 200, description = "Authenticated session", body = SessionResponse),
        (status = 401, description = "No valid session")
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn current_session(user: CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}
