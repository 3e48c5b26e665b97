//! Debug views of raw episode structures

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::episode::{battle_view, overtime_view, OvertimeView};
use crate::error::ApiResult;
use crate::AppState;

/// GET /debug/battles/:video_id
///
/// 404 with `{"error": "Not a battle"}` when the video has no battle.
pub async fn debug_battle(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> ApiResult<Response> {
    Ok(match battle_view(state.source.as_ref(), video_id).await? {
        Some(battle) => Json(battle).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Not a battle"}))).into_response(),
    })
}

/// GET /debug/overtime/:video_id
///
/// JSON `null` when the video has no overtime episode.
pub async fn debug_overtime(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> ApiResult<Json<Option<OvertimeView>>> {
    Ok(Json(overtime_view(state.source.as_ref(), video_id).await?))
}
