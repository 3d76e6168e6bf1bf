use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use phonon_backend::config::ServerConfig;
use phonon_backend::routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("Invalid server configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if !config.index_file().is_file() {
        log::warn!(
            "No index.html in {}; build the frontend bundle first.",
            config.frontend_dir.display()
        );
    }
    log::info!("Serving page from {}", config.frontend_dir.display());
    log::info!("Serving logos from {}", config.assets_dir.display());

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .configure(|cfg| configure_routes(cfg, &config))
    })
    .bind(&bind_address)?
    .run()
    .await
}
