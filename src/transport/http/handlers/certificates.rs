use crate::domain::model::CertificateFields;
use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, IssueCertificateRequest, SearchQuery,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/certificates",
    request_body = IssueCertificateRequest,
    responses(
        (status = 201, description = "Certificate issued to the signed-in user", body = ApiResponse),
        (status = 401, description = "No active session", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn issue_handler(
    State(state): State<AppState>,
    request: Result<Json<IssueCertificateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                r#"{"learnerName","courseName","instituteName","completionDate"}"#,
            )
            .into_response()
        }
    };

    let fields = CertificateFields {
        learner_name: request.learner_name,
        course_name: request.course_name,
        institute_name: request.institute_name,
        completion_date: request.completion_date,
    };

    match state.ledger.issue_certificate(fields).await {
        Ok(certificate) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(serde_json::json!({ "certificate": certificate }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/certificates/verify/{token}",
    params(
        ("token" = String, Path, description = "Certificate digest or identifier (exact match)")
    ),
    responses(
        (status = 200, description = "Certificate found", body = ApiResponse),
        (status = 404, description = "No certificate with this digest or identifier", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> impl IntoResponse {
    match state.ledger.verify_certificate(&token).await {
        Ok(Some(certificate)) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "verified": true,
                "certificate": certificate,
            }))),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "verified": false })),
                error: Some("Certificate not found".to_string()),
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/certificates/mine",
    params(SearchQuery),
    responses(
        (status = 200, description = "Certificates owned by the signed-in user, in issuance order", body = ApiResponse),
        (status = 401, description = "No active session", body = ApiResponse)
    )
)]
pub async fn my_certificates_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.ledger.my_certificates(query.search.as_deref()).await {
        Ok(certificates) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "count": certificates.len(),
                "certificates": certificates,
            }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
