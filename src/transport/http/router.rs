use crate::transport::http::handlers::{auth, certificates, health};
use crate::transport::http::types::{
    ApiResponse, IssueCertificateRequest, LogInRequest, SignUpRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::session_handler,
        certificates::issue_handler,
        certificates::verify_handler,
        certificates::my_certificates_handler
    ),
    components(schemas(ApiResponse, SignUpRequest, LogInRequest, IssueCertificateRequest))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/session", get(auth::session_handler))
        .route("/certificates", post(certificates::issue_handler))
        .route("/certificates/verify/:token", get(certificates::verify_handler))
        .route("/certificates/mine", get(certificates::my_certificates_handler))
        .with_state(app_state)
}
