//! # Postcraft API Server
//!
//! Actix-web server that drafts social posts with an AI provider and streams
//! progress and results to the browser as server-sent events.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting {} on {}:{}",
        config.service_name,
        config.host,
        config.port
    );

    let state = AppState::new(&config).map_err(std::io::Error::other)?;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(handlers::configure_routes(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
