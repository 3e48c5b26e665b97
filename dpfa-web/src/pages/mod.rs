//! Server-rendered HTML pages

pub mod artists;
pub mod categories;
pub mod home;
pub mod layout;
pub mod site;
pub mod songs;
pub mod videos;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::catalog::SearchTerm;
use crate::error::PageResult;
use crate::AppState;

/// Optional `q` on listing pages; blank means "show the search box only"
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub q: Option<String>,
}

impl PageQuery {
    pub fn term(&self) -> PageResult<Option<SearchTerm>> {
        Ok(SearchTerm::parse_optional(self.q.as_deref())?)
    }
}

/// HTML page and site-file routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/search", get(home::search_page))
        .route("/contact", get(home::contact_page))
        .route("/contact/submit", post(home::contact_submit))
        .route("/songs", get(songs::songs_page))
        .route("/songs/:id", get(songs::song_detail_page))
        .route("/artists", get(artists::artists_page))
        .route("/artists/:id", get(artists::artist_detail_page))
        .route("/videos", get(videos::videos_page))
        .route("/videos/categories", get(categories::categories_page))
        .route("/videos/categories/:slug", get(categories::category_detail_page))
        .route("/videos/:id", get(videos::video_detail_page))
        .route("/robots.txt", get(site::robots))
        .route("/sitemap.xml", get(site::sitemap))
}
