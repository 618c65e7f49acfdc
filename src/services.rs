use actix_web::{error, web, HttpRequest};
use log::debug;

use crate::errors::ApiError;

pub mod health;
pub mod users;

/// Registers every route. Callers provide `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::home)
        .service(health::health_check)
        .service(users::add_user)
        .service(users::get_next_id);
}

/// Malformed bodies get the same `{ "error": ... }` shape as everything else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, req: &HttpRequest| {
        debug!("Rejected body for {}: {}", req.path(), err);
        ApiError::BadRequest(err.to_string()).into()
    })
}
