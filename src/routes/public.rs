use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a gate pass. This list must stay in step with
/// the gate's exemption patterns: a route added here but not exempted would
/// redirect to itself.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for monitoring and load balancer checks.
        .route("/health", get(handlers::ops::health))
        // GET /run-migrate/
        // Deploy hook: applies migrations and bootstraps the staff user.
        .route("/run-migrate/", get(handlers::ops::run_migrate))
        // GET /gate/ — the password prompt.
        // POST /gate/ — password check; sets the gate cookie on success.
        .route(
            "/gate/",
            get(handlers::gate::gate_page).post(handlers::gate::gate_accept),
        )
        // GET /gate/logout/ — drops the gate cookie.
        .route("/gate/logout/", get(handlers::gate::gate_logout))
}
