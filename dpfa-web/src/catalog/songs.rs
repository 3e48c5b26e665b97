//! Song views: search results, lookup by Spotify track id, detail page

use dpfa_common::aggregate::{root_row, sort_nulls_last};
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;

use super::search::{SearchLimit, SearchTerm};

/// Song with its credited artists in billing order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongSummary {
    pub id: i64,
    pub title: String,
    pub spotify_track_id: Option<String>,
    pub artists: Vec<String>,
}

/// Video a song appears in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRef {
    pub id: i64,
    pub title: String,
    pub youtube_video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongDetail {
    pub id: i64,
    pub title: String,
    pub spotify_track_id: Option<String>,
    pub artists: Vec<String>,
    pub videos: Vec<VideoRef>,
}

const SEARCH_SONGS_SQL: &str = r#"
SELECT
  s.id               AS song_id,
  s.title            AS song_title,
  s.spotify_track_id AS spotify_track_id,
  a.id               AS artist_id,
  a.name             AS artist_name,
  sa.artist_order    AS artist_order
FROM (
  SELECT id, title, spotify_track_id
  FROM songs
  WHERE lower(title) LIKE ?1 ESCAPE '\'
    AND EXISTS (SELECT 1 FROM song_artists c WHERE c.song_id = songs.id)
  ORDER BY title, id
  LIMIT ?2
) s
JOIN song_artists sa ON sa.song_id = s.id
JOIN artists a       ON a.id = sa.artist_id
ORDER BY s.title, s.id, sa.artist_order NULLS LAST
"#;

const SONG_BY_TRACK_ID_SQL: &str = r#"
SELECT
  s.id               AS song_id,
  s.title            AS song_title,
  s.spotify_track_id AS spotify_track_id,
  a.id               AS artist_id,
  a.name             AS artist_name,
  sa.artist_order    AS artist_order
FROM (
  SELECT id, title, spotify_track_id
  FROM songs
  WHERE spotify_track_id = ?1
    AND EXISTS (SELECT 1 FROM song_artists c WHERE c.song_id = songs.id)
  LIMIT 1
) s
JOIN song_artists sa ON sa.song_id = s.id
JOIN artists a       ON a.id = sa.artist_id
ORDER BY sa.artist_order NULLS LAST
"#;

const SONG_DETAIL_SQL: &str = r#"
SELECT
  s.id               AS song_id,
  s.title            AS song_title,
  s.spotify_track_id AS spotify_track_id,
  a.id               AS artist_id,
  a.name             AS artist_name,
  sa.artist_order    AS artist_order,
  v.id               AS video_id,
  v.title            AS video_title,
  v.youtube_video_id AS youtube_video_id
FROM songs s
LEFT JOIN song_artists sa ON sa.song_id = s.id
LEFT JOIN artists a       ON a.id = sa.artist_id
LEFT JOIN video_songs vs  ON vs.song_id = s.id
LEFT JOIN videos v        ON v.id = vs.video_id
WHERE s.id = ?1
ORDER BY sa.artist_order NULLS LAST, v.published_at NULLS LAST, v.id
"#;

pub async fn search_songs(
    source: &dyn RowSource,
    term: &SearchTerm,
    limit: SearchLimit,
) -> Result<Vec<SongSummary>> {
    let query = SqlQuery::new("search_songs", SEARCH_SONGS_SQL)
        .bind(term.like_pattern())
        .bind(limit.get());
    let rows = source.fetch_all(&query).await?;
    Ok(fold_song_summaries(&rows))
}

pub async fn song_by_track_id(
    source: &dyn RowSource,
    spotify_track_id: &str,
) -> Result<Option<SongSummary>> {
    let query = SqlQuery::new("song_by_track_id", SONG_BY_TRACK_ID_SQL).bind(spotify_track_id);
    let rows = source.fetch_all(&query).await?;
    Ok(fold_song_summaries(&rows).into_iter().next())
}

pub async fn song_detail(source: &dyn RowSource, song_id: i64) -> Result<Option<SongDetail>> {
    let query = SqlQuery::new("song_detail", SONG_DETAIL_SQL).bind(song_id);
    let rows = source.fetch_all(&query).await?;
    Ok(fold_song_detail(&rows))
}

struct SummaryBuilder {
    id: i64,
    title: String,
    spotify_track_id: Option<String>,
    artists: ChildList<i64, (Option<i64>, String)>,
}

/// Group song→artist rows into one summary per song.
///
/// Artists are ordered by `artist_order` within each song, unordered
/// credits last.
pub(crate) fn fold_song_summaries(rows: &[FlatRow]) -> Vec<SongSummary> {
    let mut songs: OrderedGroups<i64, SummaryBuilder> = OrderedGroups::new();

    for row in rows {
        let Some(song_id) = row.int("song_id") else {
            continue;
        };
        let song = songs.get_or_insert_with(song_id, || SummaryBuilder {
            id: song_id,
            title: row.text("song_title").unwrap_or_default(),
            spotify_track_id: row.text("spotify_track_id"),
            artists: ChildList::new(),
        });
        song.artists.push(row.int("artist_id"), || {
            (row.int("artist_order"), row.text("artist_name").unwrap_or_default())
        });
    }

    songs
        .into_values()
        .into_iter()
        .map(|song| {
            let mut artists = song.artists.into_vec();
            sort_nulls_last(&mut artists, |(order, _)| *order);
            SongSummary {
                id: song.id,
                title: song.title,
                spotify_track_id: song.spotify_track_id,
                artists: artists.into_iter().map(|(_, name)| name).collect(),
            }
        })
        .collect()
}

pub(crate) fn fold_song_detail(rows: &[FlatRow]) -> Option<SongDetail> {
    let root = root_row(rows, "song_id", &["song_title", "spotify_track_id"])?;

    let mut artists = ChildList::new();
    let mut videos = ChildList::new();

    for row in rows {
        artists.push(row.int("artist_id"), || {
            row.text("artist_name").unwrap_or_default()
        });
        videos.push(row.int("video_id"), || VideoRef {
            id: row.int("video_id").unwrap_or_default(),
            title: row.text("video_title").unwrap_or_default(),
            youtube_video_id: row.text("youtube_video_id"),
        });
    }

    Some(SongDetail {
        id: root.int("song_id")?,
        title: root.text("song_title").unwrap_or_default(),
        spotify_track_id: root.text("spotify_track_id"),
        artists: artists.into_vec(),
        videos: videos.into_vec(),
    })
}
