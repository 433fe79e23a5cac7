//! API key service - main entry point.
//!
//! Initializes the database, then starts the Actix-web server.

use actix_web::{App, HttpServer, web};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use apikey_service_lib::api;
use apikey_service_lib::config::Config;
use apikey_service_lib::db::DbPool;
use apikey_service_lib::middleware::RequestLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).map_err(std::io::Error::other)?;

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Blocks until the database is ready or retries are exhausted
    let pool = match DbPool::initialize(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize DB: {}", e);
            std::process::exit(1);
        }
    };

    let static_dir = if config.static_dir.is_dir() {
        info!("Static file serving enabled from {:?}", config.static_dir);
        Some(config.static_dir.clone())
    } else {
        info!(
            "Static directory {:?} not found, static file serving disabled",
            config.static_dir
        );
        None
    };

    let bind_address = config.bind_address();
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, config.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .configure(api::configure_app(static_dir.clone()))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
