use crate::AppState;
use axum::{extract::State, http::StatusCode};

/// health
///
/// [Public Route] Liveness probe. No database round-trip.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> &'static str {
    "OK"
}

/// run_migrate
///
/// [Public Route] One-shot deploy hook: applies pending migrations, then
/// makes sure the bootstrap staff user exists. Idempotent, safe to call on
/// every deploy. Exempt from the gate so a fresh database can be initialized
/// before anyone can log in.
#[utoipa::path(
    get,
    path = "/run-migrate/",
    responses(
        (status = 200, description = "Migrations applied"),
        (status = 500, description = "Migration failure")
    )
)]
pub async fn run_migrate(State(state): State<AppState>) -> Result<String, StatusCode> {
    if !state.repo.migrate().await {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let email = &state.config.staff_bootstrap_email;
    match state.repo.ensure_staff_user(email).await {
        Some(user) => Ok(format!(
            "migrations applied; staff user {} ready ({})\n",
            user.email, user.id
        )),
        None => {
            tracing::error!("staff bootstrap failed for {}", email);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
