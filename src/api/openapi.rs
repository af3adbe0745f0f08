//! OpenAPI documentation configuration.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, budget_handler};
use crate::api::middleware::CurrentUser;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{BudgetEstimate, UserResponse};
use crate::services::SessionToken;
use crate::types::MessageResponse;

/// OpenAPI documentation for the travel budget API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel Budget API",
        version = "0.1.0",
        description = "Account registration, sessions and a travel budget calculator",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::current_session,
        budget_handler::estimate,
    ),
    components(
        schemas(
            UserResponse,
            CurrentUser,
            SessionToken,
            MessageResponse,
            BudgetEstimate,
            auth_handler::RegisterRequest,
            auth_handler::RegisterResponse,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            auth_handler::SessionResponse,
            budget_handler::BudgetForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and sessions"),
        (name = "Budget", description = "Trip cost estimation")
    )
)]
pub struct ApiDoc;

/// Session marker schemes: bearer header or cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token obtained from /auth/login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
