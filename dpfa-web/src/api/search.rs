//! Search endpoints
//!
//! `q` is required and must be non-blank; `limit` defaults to 50 and is
//! clamped to the service maximum.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::{
    search_artists, search_songs, search_videos, ArtistSummary, SearchLimit, SearchTerm,
    SongSummary, VideoSummary,
};
use crate::error::ApiResult;
use crate::AppState;

/// Query parameters shared by the search endpoints
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

impl SearchQuery {
    fn shape(&self) -> ApiResult<(SearchTerm, SearchLimit)> {
        Ok((
            SearchTerm::parse(&self.q)?,
            SearchLimit::from_request(self.limit)?,
        ))
    }
}

/// GET /api/search?q=&limit=
pub async fn search_songs_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SongSummary>>> {
    let (term, limit) = query.shape()?;
    let songs = search_songs(state.source.as_ref(), &term, limit).await?;
    tracing::debug!(q = term.as_str(), results = songs.len(), "Song search");
    Ok(Json(songs))
}

/// GET /api/search/artists?q=&limit=
pub async fn search_artists_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ArtistSummary>>> {
    let (term, limit) = query.shape()?;
    Ok(Json(search_artists(state.source.as_ref(), &term, limit).await?))
}

/// GET /api/search/videos?q=&limit=
pub async fn search_videos_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<VideoSummary>>> {
    let (term, limit) = query.shape()?;
    Ok(Json(search_videos(state.source.as_ref(), &term, limit).await?))
}
