//! dpfa-web library - fan archive catalog service
//!
//! Read-only JSON API and server-rendered pages over the catalog of songs,
//! artists and videos, plus per-video episode content.

use std::sync::Arc;

use axum::Router;
use dpfa_common::RowSource;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod contact;
pub mod episode;
pub mod error;
pub mod pages;

use contact::ContactNotifier;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog query executor (read-only)
    pub source: Arc<dyn RowSource>,
    /// Contact form webhook client
    pub notifier: ContactNotifier,
    /// Public site origin without trailing slash
    pub base_url: String,
}

impl AppState {
    pub fn new(source: Arc<dyn RowSource>, notifier: ContactNotifier, base_url: impl Into<String>) -> Self {
        Self {
            source,
            notifier,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // JSON API is public and read-only
    let api = api::api_routes().layer(CorsLayer::permissive());

    Router::new()
        .merge(api)
        .merge(pages::page_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
