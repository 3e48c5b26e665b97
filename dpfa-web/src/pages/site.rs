//! robots.txt and sitemap.xml

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::layout::escape_html;
use crate::catalog::sitemap::{sitemap_entries, SitemapEntries};
use crate::error::ApiResult;
use crate::AppState;

/// Paths crawlers should skip
const DISALLOWED: &[&str] = &["/api/", "/docs", "/openapi.json", "/debug/", "/contact/submit"];

/// Static pages listed ahead of the database-backed ones
const STATIC_PAGES: &[&str] = &["/", "/videos", "/songs", "/artists", "/videos/categories"];

pub fn robots_txt(base_url: &str) -> String {
    let mut body = String::from("User-agent: *\n");
    for path in DISALLOWED {
        body.push_str(&format!("Disallow: {}\n", path));
    }
    body.push_str(&format!("\nSitemap: {}/sitemap.xml\n", base_url));
    body
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        robots_txt(&state.base_url),
    )
        .into_response()
}

pub fn sitemap_urls(base_url: &str, entries: &SitemapEntries) -> Vec<String> {
    let mut urls: Vec<String> = STATIC_PAGES
        .iter()
        .map(|path| format!("{}{}", base_url, path))
        .collect();

    urls.extend(
        entries
            .categories
            .iter()
            .map(|c| format!("{}/videos/categories/{}", base_url, c.slug)),
    );
    urls.extend(entries.video_ids.iter().map(|id| format!("{}/videos/{}", base_url, id)));
    urls.extend(entries.song_ids.iter().map(|id| format!("{}/songs/{}", base_url, id)));
    urls.extend(entries.artist_ids.iter().map(|id| format!("{}/artists/{}", base_url, id)));
    urls
}

pub fn render_sitemap(urls: &[String]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#.to_string(),
    ];
    for url in urls {
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", escape_html(url)));
        lines.push("  </url>".to_string());
    }
    lines.push("</urlset>".to_string());
    lines.join("\n")
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> ApiResult<Response> {
    let entries = sitemap_entries(state.source.as_ref()).await?;
    let urls = sitemap_urls(&state.base_url, &entries);
    tracing::debug!(urls = urls.len(), "Rendered sitemap");

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&urls),
    )
        .into_response())
}
