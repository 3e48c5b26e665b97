//! Video lookups and the composite episode view

use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::{video_detail, VideoDetail};
use crate::episode::{episode_view, EpisodeView};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/videos/:id
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<VideoDetail>> {
    video_detail(state.source.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Video {}", id)))
}

/// GET /api/videos/:id/episode
///
/// Video detail plus any battle, overtime, bucket list or stereotype skit.
pub async fn get_episode(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EpisodeView>> {
    episode_view(state.source.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Video {}", id)))
}
