pub mod handlers;
mod types;

pub use types::{HealthResponse, MessageResponse};

use crate::{Result, adapter::AnswerAdapter, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/greet/:name", get(handlers::greet))
        .route("/api/answer", post(handlers::answer))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let adapter = AnswerAdapter::from_config(&config)?;
    info!(
        "Answer adapter ready ({:?} provider, model {}, {:?} responses)",
        config.llm.provider,
        config.llm.model,
        adapter.mode()
    );

    let app_state = AppState {
        adapter: Arc::new(adapter),
    };

    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
