use actix_web::{get, web, HttpResponse, Responder};
use log::error;

use crate::{
    config::DatabaseConfig,
    db::with_connection,
    models::StatusResponse,
    AppState,
};

pub const SERVER_ONLINE: &str = "Servidor en línea";

#[get("/")]
pub async fn home() -> impl Responder {
    web::Json(StatusResponse {
        status: SERVER_ONLINE.to_owned(),
    })
}

/// Never creates the database file, and only reports healthy when the
/// `Usuarios` table is readable.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let existing = DatabaseConfig {
        create_if_missing: false,
        ..state.db.clone()
    };
    let check = with_connection(&existing, |conn| {
        conn.query_row("SELECT COUNT(*) FROM Usuarios LIMIT 1", [], |_| Ok(()))?;
        Ok(())
    });
    match check.await {
        Ok(()) => HttpResponse::Ok().body("Healthy"),
        Err(why) => {
            error!("{}", why);
            HttpResponse::ServiceUnavailable().body("Unhealthy")
        }
    }
}
