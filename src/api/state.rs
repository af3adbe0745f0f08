//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserStore};
use crate::services::{AccountManager, AccountService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and session markers
    pub account_service: Arc<dyn AccountService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
    /// Runtime configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the SeaORM-backed services from a database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let account_service = Arc::new(AccountManager::new(users, config.clone()));

        Self {
            account_service,
            database,
            config: Arc::new(config),
        }
    }
}
