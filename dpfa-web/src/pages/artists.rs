//! Artist pages

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use super::layout::{escape_html, link, list_or, page, search_form};
use super::PageQuery;
use crate::catalog::{artist_detail, search_artists, ArtistDetail, SearchLimit};
use crate::error::{PageError, PageResult};
use crate::AppState;

/// GET /artists?q=
pub async fn artists_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let term = query.term()?;
    let results = match &term {
        Some(term) => {
            Some(search_artists(state.source.as_ref(), term, SearchLimit::default()).await?)
        }
        None => None,
    };

    let mut body = format!(
        "<h1>Artists</h1>\n{}\n",
        search_form("/artists", "Artist name", term.as_ref().map(|t| t.as_str()))
    );
    if let Some(results) = results {
        body.push_str(&list_or(
            results.iter().map(|artist| {
                format!(
                    "{} <span class=\"muted\">({} songs)</span>",
                    link(&format!("/artists/{}", artist.id), &artist.name),
                    artist.song_count
                )
            }),
            "No artists found.",
        ));
    }
    Ok(Html(page("Artists", &body)))
}

/// GET /artists/:id
pub async fn artist_detail_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let artist = artist_detail(state.source.as_ref(), id)
        .await?
        .ok_or_else(|| PageError::not_found(format!("Artist {}", id)))?;
    Ok(Html(page(&artist.name, &render_artist(&artist))))
}

fn render_artist(artist: &ArtistDetail) -> String {
    let mut body = format!("<h1>{}</h1>\n<h2>Songs</h2>\n", escape_html(&artist.name));
    body.push_str(&list_or(
        artist.songs.iter().map(|song| {
            let videos: Vec<String> = song
                .videos
                .iter()
                .map(|video| link(&format!("/videos/{}", video.id), &video.title))
                .collect();
            if videos.is_empty() {
                link(&format!("/songs/{}", song.id), &song.title)
            } else {
                format!(
                    "{} <span class=\"muted\">in</span> {}",
                    link(&format!("/songs/{}", song.id), &song.title),
                    videos.join(", ")
                )
            }
        }),
        "No songs recorded for this artist.",
    ));
    body
}
