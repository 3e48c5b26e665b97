//! Video category endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    category_by_slug, list_categories, videos_for_category, Category, CategoryVideo, SearchTerm,
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
    pub videos: Vec<CategoryVideo>,
}

/// GET /api/categories
pub async fn get_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(list_categories(state.source.as_ref()).await?))
}

/// GET /api/categories/:slug?q=
///
/// A blank `q` lists every video in the category.
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<CategoryResponse>> {
    let filter = SearchTerm::parse_optional(query.q.as_deref())?;
    let source = state.source.as_ref();

    let category = category_by_slug(source, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category '{}'", slug)))?;
    let videos = videos_for_category(source, category.id, filter.as_ref()).await?;

    Ok(Json(CategoryResponse { category, videos }))
}
