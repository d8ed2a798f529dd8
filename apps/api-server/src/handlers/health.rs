//! Health check endpoint.

use actix_web::{HttpResponse, web};
use postcraft_shared::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::handlers::configure_routes;
    use crate::test_support::stub_state;

    #[actix_web::test]
    async fn test_health_reports_ok() {
        let app = test::init_service(App::new().configure(configure_routes(stub_state(vec![], 10))))
            .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "Postcraft Post Generator API");
        assert!(body["timestamp"].is_string());
        assert!(body["version"].is_string());
    }
}
