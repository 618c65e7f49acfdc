//! Backend for the `Usuarios` table: insert a user and hand out the next
//! free identifier, plus the client used by the card form.

pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod validator;

use config::DatabaseConfig;

/// Shared with every handler through `web::Data`.
pub struct AppState {
    pub db: DatabaseConfig,
}
