//! Shared helpers for dpfa-web integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use dpfa_common::db::SqliteRowSource;
use dpfa_common::RowSource;
use dpfa_web::contact::ContactNotifier;
use dpfa_web::{build_router, AppState};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

pub const BASE_URL: &str = "https://archive.test";

/// In-memory catalog loaded with the schema and seed rows
pub async fn seeded_pool() -> SqlitePool {
    // One connection that never recycles, so the in-memory database survives
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");

    sqlx::raw_sql(include_str!("../../sql/schema.sql"))
        .execute(&pool)
        .await
        .expect("Should create schema");
    sqlx::raw_sql(include_str!("../fixtures/seed.sql"))
        .execute(&pool)
        .await
        .expect("Should load seed data");

    pool
}

pub fn app_with_source(source: Arc<dyn RowSource>) -> Router {
    build_router(AppState::new(source, ContactNotifier::disabled(), BASE_URL))
}

/// Router over the seeded catalog with contact delivery disabled
pub async fn seeded_app() -> Router {
    app_with_source(Arc::new(SqliteRowSource::new(seeded_pool().await)))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

pub async fn extract_text(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).expect("Should be UTF-8")
}
