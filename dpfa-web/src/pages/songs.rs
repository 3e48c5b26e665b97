//! Song pages

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use super::layout::{escape_html, link, list_or, page, search_form};
use super::PageQuery;
use crate::catalog::{search_songs, song_detail, SearchLimit, SongDetail, SongSummary};
use crate::error::{PageError, PageResult};
use crate::AppState;

/// GET /songs?q=
pub async fn songs_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let term = query.term()?;
    let results = match &term {
        Some(term) => Some(search_songs(state.source.as_ref(), term, SearchLimit::default()).await?),
        None => None,
    };

    let mut body = format!(
        "<h1>Songs</h1>\n{}\n",
        search_form("/songs", "Song title", term.as_ref().map(|t| t.as_str()))
    );
    if let Some(results) = results {
        body.push_str(&list_or(results.iter().map(song_item), "No songs found."));
    }
    Ok(Html(page("Songs", &body)))
}

fn song_item(song: &SongSummary) -> String {
    let by = if song.artists.is_empty() {
        String::new()
    } else {
        format!(" <span class=\"muted\">by {}</span>", escape_html(&song.artists.join(", ")))
    };
    format!("{}{}", link(&format!("/songs/{}", song.id), &song.title), by)
}

/// GET /songs/:id
pub async fn song_detail_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let song = song_detail(state.source.as_ref(), id)
        .await?
        .ok_or_else(|| PageError::not_found(format!("Song {}", id)))?;
    Ok(Html(page(&song.title, &render_song(&song))))
}

fn render_song(song: &SongDetail) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape_html(&song.title));
    if !song.artists.is_empty() {
        body.push_str(&format!("<p>by {}</p>\n", escape_html(&song.artists.join(", "))));
    }
    if let Some(track) = &song.spotify_track_id {
        body.push_str(&format!(
            "<p>{}</p>\n",
            link(&format!("https://open.spotify.com/track/{}", track), "Listen on Spotify")
        ));
    }
    body.push_str("<h2>Appears in</h2>\n");
    body.push_str(&list_or(
        song.videos
            .iter()
            .map(|video| link(&format!("/videos/{}", video.id), &video.title)),
        "Not linked to any video yet.",
    ));
    body
}
