use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct PingResponse {
    pub data: &'static str,
}

/// Liveness probe. Always answers `200 {"data": "Successful Ping!"}`.
#[tracing::instrument(
    name = "Ping",
    fields(request_id = %Uuid::new_v4())
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { data: "Successful Ping!" })
}
