use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::{json_422, ApiResponse, AppState, LogInRequest, SignUpRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = ApiResponse),
        (status = 409, description = "Email already exists", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    request: Result<Json<SignUpRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, r#"{"name","email","password"}"#).into_response(),
    };

    match state
        .ledger
        .sign_up(&request.name, &request.email, &request.password)
        .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(serde_json::json!({ "user": user }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LogInRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse),
        (status = 401, description = "Wrong password", body = ApiResponse),
        (status = 404, description = "No account for this email", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LogInRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, r#"{"email","password"}"#).into_response(),
    };

    match state.ledger.log_in(&request.email, &request.password).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "user": user }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn logout_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.ledger.log_out().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({ "state": "anonymous" }))),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Current session state", body = ApiResponse)
    )
)]
pub async fn session_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.ledger.session().await;
    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({
            "authenticated": session.is_authenticated(),
            "user": session.user(),
        }))),
    )
}
