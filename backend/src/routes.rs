use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::web;
use shared::STATIC_PREFIX;

use crate::config::ServerConfig;

/// Mounts the logo assets and the compiled page. Unknown paths fall back to
/// `index.html` so the page owns every route.
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &ServerConfig) {
    let index = config.index_file();

    cfg.service(Files::new(STATIC_PREFIX, &config.assets_dir))
        .service(
            Files::new("/", &config.frontend_dir)
                .index_file("index.html")
                .default_handler(fn_service(move |req: ServiceRequest| {
                    let index = index.clone();
                    async move {
                        let (req, _) = req.into_parts();
                        log::debug!("Serving index for {}", req.path());
                        let file = NamedFile::open_async(index).await?;
                        let res = file.into_response(&req);
                        Ok(ServiceResponse::new(req, res))
                    }
                })),
        );
}
