use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use user_registry::{config::AppConfig, db::prepare_schema, services, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env().map_err(|why| {
        error!("{}", why);
        io::Error::new(io::ErrorKind::InvalidInput, why)
    })?;

    prepare_schema(&config.database).map_err(|why| {
        error!("{}", why);
        io::Error::new(io::ErrorKind::Other, why)
    })?;

    let state = web::Data::new(AppState {
        db: config.database.clone(),
    });

    info!(
        "Listening on http://{} with {} worker(s)",
        config.bind_addr, config.workers
    );
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
    })
    .workers(config.workers)
    .bind(config.bind_addr)?
    .run()
    .await
}
