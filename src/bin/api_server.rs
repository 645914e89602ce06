// src/bin/api_server.rs

use skill_ledger::transport;
use skill_ledger::{LedgerConfig, LedgerService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = LedgerConfig::from_env()?;
    tracing::info!(
        backend = ?config.backend,
        verify_delay_ms = config.verify_delay.as_millis() as u64,
        digest_mode = ?config.digest_mode,
        "Starting skill ledger"
    );

    // --- Service Initialization ---
    let ledger = LedgerService::new(&config).await?;
    match ledger.session().await.user() {
        Some(user) => tracing::info!(user_id = %user.id, email = %user.email, "Session restored"),
        None => tracing::info!("No persisted session (anonymous)"),
    }

    let app_state = transport::http::AppState {
        ledger: Arc::new(ledger),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API server listening (Swagger UI at /swagger-ui)");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}
