//! Artist lookups

use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::{artist_detail, ArtistDetail};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ArtistDetail>> {
    artist_detail(state.source.as_ref(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Artist {}", id)))
}
