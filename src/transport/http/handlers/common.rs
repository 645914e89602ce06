use crate::domain::error::LedgerError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;

pub fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::DuplicateEmail => StatusCode::CONFLICT,
        LedgerError::NotFound => StatusCode::NOT_FOUND,
        LedgerError::InvalidCredentials | LedgerError::Unauthenticated => StatusCode::UNAUTHORIZED,
        LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a ledger error onto the response envelope.
///
/// Storage failures are logged here and reported to the client generically.
pub fn error_response(err: LedgerError) -> (StatusCode, Json<ApiResponse>) {
    let status = status_for(&err);
    let message = match &err {
        LedgerError::Storage(e) => {
            tracing::error!(error = %e, "storage failure");
            "Storage failure".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::err(message)))
}
