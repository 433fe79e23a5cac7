//! API endpoint modules and route wiring.

pub mod api_keys;

use std::path::PathBuf;

use actix_files::Files;
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{HttpResponse, ResponseError, guard, web};

use crate::error::{AppError, AppResult};

pub use api_keys::configure_routes as configure_api_key_routes;

/// Fallback for anything no route or static file matched.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound)
}

/// Register every route: the `/api` scope, optional static files at `/`,
/// and the 404 fallback.
pub fn configure_app(static_dir: Option<PathBuf>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(web::scope("/api").configure(configure_api_key_routes));

        if let Some(dir) = static_dir {
            cfg.service(
                Files::new("/", dir)
                    .index_file("index.html")
                    .prefer_utf8(true)
                    .guard(guard::Any(guard::Get()).or(guard::Head()))
                    .default_handler(fn_service(|req: ServiceRequest| async move {
                        let (req, _) = req.into_parts();
                        let res = AppError::NotFound.error_response();
                        Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                    })),
            );
        }

        cfg.default_service(web::to(not_found));
    }
}
