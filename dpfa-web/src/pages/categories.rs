//! Video category pages

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use super::layout::{escape_html, link, list_or, page, search_form};
use super::PageQuery;
use crate::catalog::{category_by_slug, list_categories, videos_for_category};
use crate::error::{PageError, PageResult};
use crate::AppState;

/// GET /videos/categories
pub async fn categories_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let categories = list_categories(state.source.as_ref()).await?;

    let body = format!(
        "<h1>Video Categories</h1>\n{}",
        list_or(
            categories.iter().map(|category| {
                let description = category
                    .description
                    .as_deref()
                    .map(|d| format!(" <span class=\"muted\">{}</span>", escape_html(d)))
                    .unwrap_or_default();
                format!(
                    "{}{}",
                    link(&format!("/videos/categories/{}", category.slug), &category.title),
                    description
                )
            }),
            "No categories yet.",
        )
    );
    Ok(Html(page("Video Categories", &body)))
}

/// GET /videos/categories/:slug?q=
pub async fn category_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let term = query.term()?;
    let source = state.source.as_ref();

    let category = category_by_slug(source, &slug)
        .await?
        .ok_or_else(|| PageError::not_found(format!("Category '{}'", slug)))?;
    let videos = videos_for_category(source, category.id, term.as_ref()).await?;

    let mut body = format!("<h1>{}</h1>\n", escape_html(&category.title));
    if let Some(description) = &category.description {
        body.push_str(&format!("<p>{}</p>\n", escape_html(description)));
    }
    body.push_str(&search_form(
        &format!("/videos/categories/{}", category.slug),
        "Filter by title",
        term.as_ref().map(|t| t.as_str()),
    ));
    body.push('\n');
    body.push_str(&list_or(
        videos.iter().map(|video| {
            format!(
                "{} <span class=\"muted\">{} songs</span>",
                link(&format!("/videos/{}", video.id), &video.title),
                video.song_count
            )
        }),
        "No videos match.",
    ));

    Ok(Html(page(&category.title, &body)))
}
