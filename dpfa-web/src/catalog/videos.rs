//! Video views: search results and detail (video → songs → artists)

use dpfa_common::aggregate::root_row;
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;

use super::search::{SearchLimit, SearchTerm};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub id: i64,
    pub title: String,
    pub youtube_video_id: Option<String>,
    pub published_at: Option<String>,
    pub song_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSong {
    pub id: i64,
    pub title: String,
    pub spotify_track_id: Option<String>,
    pub artists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDetail {
    pub id: i64,
    pub title: String,
    pub youtube_video_id: Option<String>,
    pub published_at: Option<String>,
    pub songs: Vec<VideoSong>,
}

const SEARCH_VIDEOS_SQL: &str = r#"
SELECT
  v.id,
  v.title,
  v.youtube_video_id,
  v.published_at,
  COUNT(DISTINCT vs.song_id) AS song_count
FROM videos v
LEFT JOIN video_songs vs ON vs.video_id = v.id
WHERE lower(v.title) LIKE ?1 ESCAPE '\'
GROUP BY v.id
ORDER BY v.published_at DESC NULLS LAST, v.id DESC
LIMIT ?2
"#;

const VIDEO_DETAIL_SQL: &str = r#"
SELECT
  v.id                AS video_id,
  v.title             AS video_title,
  v.youtube_video_id  AS youtube_video_id,
  v.published_at      AS published_at,
  s.id                AS song_id,
  s.title             AS song_title,
  s.spotify_track_id  AS spotify_track_id,
  a.id                AS artist_id,
  a.name              AS artist_name
FROM videos v
LEFT JOIN video_songs vs  ON vs.video_id = v.id
LEFT JOIN songs s         ON s.id = vs.song_id
LEFT JOIN song_artists sa ON sa.song_id = s.id
LEFT JOIN artists a       ON a.id = sa.artist_id
WHERE v.id = ?1
ORDER BY s.title, s.id, sa.artist_order NULLS LAST
"#;

pub(crate) fn video_summary(row: &FlatRow) -> Option<VideoSummary> {
    Some(VideoSummary {
        id: row.int("id")?,
        title: row.text("title").unwrap_or_default(),
        youtube_video_id: row.text("youtube_video_id"),
        published_at: row.text("published_at"),
        song_count: row.int("song_count").unwrap_or(0),
    })
}

pub async fn search_videos(
    source: &dyn RowSource,
    term: &SearchTerm,
    limit: SearchLimit,
) -> Result<Vec<VideoSummary>> {
    let query = SqlQuery::new("search_videos", SEARCH_VIDEOS_SQL)
        .bind(term.like_pattern())
        .bind(limit.get());
    let rows = source.fetch_all(&query).await?;
    Ok(rows.iter().filter_map(video_summary).collect())
}

pub async fn video_detail(source: &dyn RowSource, video_id: i64) -> Result<Option<VideoDetail>> {
    let query = SqlQuery::new("video_detail", VIDEO_DETAIL_SQL).bind(video_id);
    let rows = source.fetch_all(&query).await?;
    Ok(fold_video_detail(&rows))
}

struct SongBuilder {
    song: VideoSong,
    artists: ChildList<i64, String>,
}

pub(crate) fn fold_video_detail(rows: &[FlatRow]) -> Option<VideoDetail> {
    let root = root_row(
        rows,
        "video_id",
        &["video_title", "youtube_video_id", "published_at"],
    )?;

    let mut songs: OrderedGroups<i64, SongBuilder> = OrderedGroups::new();
    for row in rows {
        let Some(song) = songs.group(row.int("song_id"), || SongBuilder {
            song: VideoSong {
                id: row.int("song_id").unwrap_or_default(),
                title: row.text("song_title").unwrap_or_default(),
                spotify_track_id: row.text("spotify_track_id"),
                artists: Vec::new(),
            },
            artists: ChildList::new(),
        }) else {
            continue;
        };

        song.artists.push(row.int("artist_id"), || {
            row.text("artist_name").unwrap_or_default()
        });
    }

    Some(VideoDetail {
        id: root.int("video_id")?,
        title: root.text("video_title").unwrap_or_default(),
        youtube_video_id: root.text("youtube_video_id"),
        published_at: root.text("published_at"),
        songs: songs
            .into_values()
            .into_iter()
            .map(|builder| VideoSong {
                artists: builder.artists.into_vec(),
                ..builder.song
            })
            .collect(),
    })
}
