use axum::{
    extract::{RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{info, warn};
use serde_json::json;
use std::future::Future;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::bids::Aggregator;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("'s' query is empty")]
    EmptySources,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            ApiError::EmptySources => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };
        let body = Json(json!({
            "error": code,
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub fn router(aggregator: Aggregator) -> Router {
    Router::new()
        .route("/winner", get(winner).fallback(not_found))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(aggregator)
}

/// `GET /winner?s=<source>&s=<source>...`
async fn winner(
    method: Method,
    State(aggregator): State<Aggregator>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    // axum routes HEAD to the GET handler
    if method != Method::GET {
        return Ok(not_found().await.into_response());
    }
    let sources = source_params(query.as_deref().unwrap_or_default());
    if sources.is_empty() {
        return Err(ApiError::EmptySources);
    }
    info!("Auction requested for {} sources", sources.len());
    Ok(Json(aggregator.winner(&sources).await).into_response())
}

fn source_params(query: &str) -> Vec<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "s")
        .map(|(_, value)| value.into_owned())
        .collect()
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

/// Resolves on Ctrl-C or SIGTERM. The SIGTERM handler is installed when this
/// is called, not when the future is first polled.
pub fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = signal(SignalKind::terminate());
    async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match terminate {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Cannot listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => info!("Received Ctrl-C, shutting down"),
            () = terminate => info!("Received SIGTERM, shutting down"),
        }
    }
}
