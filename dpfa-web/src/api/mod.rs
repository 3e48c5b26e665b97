//! HTTP API handlers for dpfa-web

pub mod artists;
pub mod buildinfo;
pub mod categories;
pub mod debug;
pub mod health;
pub mod search;
pub mod songs;
pub mod videos;

use axum::{routing::get, Router};

use crate::AppState;

pub use buildinfo::get_build_info;
pub use health::health_routes;

/// JSON API and debug routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search::search_songs_handler))
        .route("/api/search/artists", get(search::search_artists_handler))
        .route("/api/search/videos", get(search::search_videos_handler))
        .route("/api/song/:spotify_track_id", get(songs::get_song_by_track))
        .route("/api/songs/:id", get(songs::get_song))
        .route("/api/artists/:id", get(artists::get_artist))
        .route("/api/videos/:id", get(videos::get_video))
        .route("/api/videos/:id/episode", get(videos::get_episode))
        .route("/api/categories", get(categories::get_categories))
        .route("/api/categories/:slug", get(categories::get_category))
        .route("/api/buildinfo", get(get_build_info))
        .route("/debug/battles/:video_id", get(debug::debug_battle))
        .route("/debug/overtime/:video_id", get(debug::debug_overtime))
}
