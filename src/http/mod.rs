//! HTTP server for the DID resolver.
//!
//! Thin adaptation layer: one GET route receives the DID as its final path
//! segment, lifts query parameters and headers into [`DidOptions`], and hands
//! everything to the resolver core. Response shaping (envelope vs. bare
//! document, status codes) is decided by the core.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ResolverError;
use crate::resolver::{Resolver, ResolveResponse};
use crate::types::{option_flag, DidOptions};

/// Content type of envelope responses.
const LD_JSON_PROFILE: &str =
    "application/ld+json;profile=\"https://w3id.org/did-resolution\"";

/// Shared state for the HTTP server.
pub struct AppState {
    pub resolver: Resolver,
}

pub type SharedState = Arc<AppState>;

/// Build the application router.
pub fn create_router(state: SharedState, base_path: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(&format!("{base_path}/{{did}}"), get(resolve))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check handler.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Resolve handler: GET {base_path}/{did}.
///
/// The path parameter arrives percent-encoded and is decoded by the
/// extractor, so DID URLs with fragments or queries of their own survive the
/// trip.
async fn resolve(
    State(state): State<SharedState>,
    Path(did): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let options = did_options(&params, &headers);
    match state.resolver.resolve(&did, &options).await {
        Ok(ResolveResponse::Resolution { status, result }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(header::CONTENT_TYPE, LD_JSON_PROFILE)],
            Json(result),
        )
            .into_response(),
        Ok(ResolveResponse::Document(document)) => Json(document).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Lifts resolution options out of query parameters and headers.
fn did_options(params: &HashMap<String, String>, headers: &HeaderMap) -> DidOptions {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    DidOptions {
        public_key_format: params.get("publicKeyFormat").cloned(),
        enable_experimental_public_key_types: params
            .get("enableExperimentalPublicKeyTypes")
            .is_some_and(|v| option_flag(v)),
        accept,
    }
}

impl IntoResponse for ResolverError {
    /// Rendering for errors that escape the envelope path (bare-document
    /// mode); the body still carries the machine-readable code.
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Start the HTTP server.
pub async fn serve(config: &ServerConfig, state: SharedState) -> std::io::Result<()> {
    let router = create_router(state, &config.base_path);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, base_path = %config.base_path, "did resolver listening");
    axum::serve(listener, router).await
}
