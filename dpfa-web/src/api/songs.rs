//! Song lookups

use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::{song_by_track_id, song_detail, SongDetail, SongSummary};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/song/:spotify_track_id
pub async fn get_song_by_track(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> ApiResult<Json<SongSummary>> {
    song_by_track_id(state.source.as_ref(), &track_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Song with Spotify track {}", track_id)))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SongDetail>> {
    song_detail(state.source.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Song {}", id)))
}
