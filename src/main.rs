use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use compstate_http::config::Settings;
use compstate_http::services::{CompstateManager, SystemClock};
use compstate_http::{configure_app, error, logging, AppState};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    logging::init(&settings.logging);

    info!("Starting compstate HTTP service...");

    let compstate = CompstateManager::open(&settings.compstate.path)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load compstate from {}: {}", settings.compstate.path.display(), e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        })?;

    let app_state = AppState::new(compstate, SystemClock);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        App::new()
            .configure(configure_app(app_state.clone()))
            .default_service(web::route().to(error::not_found))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    });

    let server = match settings.server.workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    server.bind((host, port))?.run().await
}
