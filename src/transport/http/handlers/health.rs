use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (storage readable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (storage unreadable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let ledger = &state.ledger;
    let counts = async {
        let users = ledger.identity().user_count().await?;
        let certificates = ledger.certificates().count().await?;
        Ok::<_, crate::domain::LedgerError>((users, certificates))
    }
    .await;

    match counts {
        Ok((users, certificates)) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "status": "ok",
                "backend": ledger.store().backend_name(),
                "digest_mode": ledger.digest_mode(),
                "verify_delay_ms": ledger.certificates().verify_delay().as_millis() as u64,
                "users": users,
                "certificates": certificates,
            }))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check storage read failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    data: Some(serde_json::json!({ "status": "unhealthy" })),
                    error: Some("Storage read failed".to_string()),
                }),
            )
                .into_response()
        }
    }
}
