//! HTTP handlers and route configuration.

mod generate;
mod health;
mod index;
mod profile;
mod stream;

use actix_web::web;

use crate::middleware::{AppError, RateLimitMiddleware};
use crate::state::AppState;

/// Body parse failures become RFC 7807 400s instead of actix's plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes around the given state.
///
/// The generation endpoints share the state's rate limiter, which runs before
/// the body is read.
pub fn configure_routes(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let limiter = state.rate_limiter.clone();
        let trust_forwarded_for = state.trust_forwarded_for;
        let rate_limit = move || {
            RateLimitMiddleware::new(limiter.clone()).trust_forwarded_for(trust_forwarded_for)
        };

        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .route("/", web::get().to(index::index))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health::health_check))
                    .service(
                        web::resource("/generate")
                            .wrap(rate_limit())
                            .route(web::post().to(generate::generate_posts)),
                    )
                    .service(
                        web::resource("/profile/tone")
                            .wrap(rate_limit())
                            .route(web::post().to(profile::profile_tone)),
                    ),
            );
    }
}
