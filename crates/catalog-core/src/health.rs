use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Ready once the database answers a ping.
///
/// Works with any router state that exposes a `DatabaseConnection` via `FromRef`.
pub async fn readyz(State(db): State<DatabaseConnection>) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
