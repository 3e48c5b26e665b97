//! Integration tests for HTML pages and site files

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{extract_text, get, seeded_app, seeded_pool, send, BASE_URL};
use dpfa_common::db::SqliteRowSource;
use dpfa_web::contact::ContactNotifier;
use dpfa_web::{build_router, AppState};

#[tokio::test]
async fn test_static_pages_render() {
    for uri in ["/", "/search", "/contact", "/songs", "/artists", "/videos"] {
        let response = send(seeded_app().await, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        let html = extract_text(response.into_body()).await;
        assert!(html.starts_with("<!DOCTYPE html>"), "GET {}", uri);
    }
}

#[tokio::test]
async fn test_song_search_page_lists_results() {
    let response = send(seeded_app().await, get("/songs?q=titan")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<a href=\"/songs/2\">Titanium</a>"));
    assert!(html.contains("by David Guetta, Sia"));
}

#[tokio::test]
async fn test_overlong_page_query_rejected() {
    let uri = format!("/videos?q={}", "a".repeat(101));
    let response = send(seeded_app().await, get(&uri)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<h1>Bad Request</h1>"));
}

#[tokio::test]
async fn test_unknown_ids_render_not_found_page() {
    for uri in ["/songs/999", "/artists/999", "/videos/999", "/videos/categories/retired"] {
        let response = send(seeded_app().await, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        let html = extract_text(response.into_body()).await;
        assert!(html.contains("<h1>Not Found</h1>"), "GET {}", uri);
    }
}

#[tokio::test]
async fn test_video_page_shows_overtime_segments() {
    let response = send(seeded_app().await, get("/videos/10")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<h2>Overtime #12</h2>"));
    assert!(html.contains("<h3>Cool or Not Cool</h3>"));
    assert!(html.contains("<h3>Mystery Segment</h3>"));
    assert!(html.contains("Pineapple pizza <span class=\"muted\">(Cory)</span>: <strong>Split</strong>"));
}

#[tokio::test]
async fn test_video_page_shows_battle() {
    let html = extract_text(send(seeded_app().await, get("/videos/11")).await.into_body()).await;
    assert!(html.contains("<h2>Battle: Ping Pong Trick Shots</h2>"));
    assert!(html.contains("<strong>Winner:</strong> Coby"));
}

#[tokio::test]
async fn test_category_pages() {
    let html = extract_text(send(seeded_app().await, get("/videos/categories")).await.into_body()).await;
    assert!(html.contains("/videos/categories/battles"));
    assert!(!html.contains("/videos/categories/retired"));

    let response = send(seeded_app().await, get("/videos/categories/overtime?q=summer")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Summer Bucket List"));
    assert!(!html.contains("<a href=\"/videos/10\">"));
}

#[tokio::test]
async fn test_robots_txt_headers() {
    let response = send(seeded_app().await, get("/robots.txt")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(response.headers()[header::PRAGMA], "no-cache");
    assert_eq!(response.headers()[header::EXPIRES], "0");

    let body = extract_text(response.into_body()).await;
    assert!(body.contains("Disallow: /api/"));
    assert!(body.contains(&format!("Sitemap: {}/sitemap.xml", BASE_URL)));
}

#[tokio::test]
async fn test_sitemap_lists_catalog() {
    let response = send(seeded_app().await, get("/sitemap.xml")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

    let xml = extract_text(response.into_body()).await;
    for path in [
        "/",
        "/videos/categories",
        "/videos/categories/battles",
        "/videos/13",
        "/songs/5",
        "/artists/5",
    ] {
        let loc = format!("<loc>{}{}</loc>", BASE_URL, path);
        assert!(xml.contains(&loc), "missing {}", loc);
    }
    assert!(!xml.contains("/videos/categories/retired"));
}

fn contact_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Pat&email=pat%40example.com&message=Missing+song&token=contact-form",
        ))
        .unwrap()
}

#[tokio::test]
async fn test_contact_submit_with_unreachable_webhook() {
    let notifier = ContactNotifier::new(
        Some("http://127.0.0.1:9/hook".to_string()),
        Duration::from_millis(200),
    )
    .unwrap();
    let source = Arc::new(SqliteRowSource::new(seeded_pool().await));
    let app = build_router(AppState::new(source, notifier, BASE_URL));

    let response = send(app, contact_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<h1>Thanks!</h1>"));
}

#[tokio::test]
async fn test_contact_submit_without_webhook() {
    let response = send(seeded_app().await, contact_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
