//! Travel Budget - accounts, sessions and a trip cost calculator
//!
//! A small JSON API built on Axum and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Account rules and the budget formula
//! - **services**: Registration, authentication and session markers
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, session middleware and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! SESSION_SECRET=... cargo run -- serve
//!
//! # Run migrations
//! SESSION_SECRET=... cargo run -- migrate up
//!
//! # Estimate a trip
//! cargo run -- estimate --people 2 --days 3 --stay 1000 --transport 500
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
