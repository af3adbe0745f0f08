//! HTTP request handlers.

pub mod auth_handler;
pub mod budget_handler;

pub use auth_handler::auth_routes;
pub use budget_handler::budget_routes;
