use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tscope_core::Result;

pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// `TECHSCOPE_PORT` and `TECHSCOPE_API_KEY`; an empty key disables the check.
    pub fn from_env() -> Self {
        Self {
            port: env::var("TECHSCOPE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            api_key: env::var("TECHSCOPE_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let state = Arc::new(state);

    let protected = Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/credibility", post(handlers::credibility))
        .route("/keywords", post(handlers::keywords))
        .route("/sentiment", post(handlers::sentiment))
        .route("/bias", post(handlers::bias))
        .route("/analyze", post(handlers::analyze))
        .route_layer(middleware::from_fn_with_state(state.clone(), handlers::require_api_key));

    Router::new()
        .route("/", get(handlers::root))
        .route("/articles", get(handlers::list_articles))
        .route("/api/records", get(handlers::list_records))
        .route("/dashboard", get(handlers::dashboard))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until the process ends.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("TechScope API listening on http://{}", addr);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState, ServerConfig};
    pub use tscope_core::{Article, Error, Result};
}
