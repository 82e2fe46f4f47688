use crate::{error::HealthError, startup::AppState};
use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument(
    name = "Database health check",
    skip_all,
    fields(request_id = %Uuid::new_v4())
)]
pub async fn health_db(State(state): State<AppState>) -> Result<Json<HealthResponse>, HealthError> {
    let database = state.database.as_ref().ok_or(HealthError::NotInitialized)?;
    database.ping().await.map_err(HealthError::ConnectionFailed)?;

    Ok(Json(HealthResponse { status: "Database connection healthy" }))
}
