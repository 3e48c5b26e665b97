//! Artist views: search results and detail (artist → songs → videos)

use dpfa_common::aggregate::root_row;
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;

use super::search::{SearchLimit, SearchTerm};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub spotify_artist_id: Option<String>,
    pub song_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistVideo {
    pub id: i64,
    pub title: String,
    pub youtube_video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSong {
    pub id: i64,
    pub title: String,
    pub spotify_track_id: Option<String>,
    pub videos: Vec<ArtistVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub spotify_artist_id: Option<String>,
    pub songs: Vec<ArtistSong>,
}

const SEARCH_ARTISTS_SQL: &str = r#"
SELECT
  a.id,
  a.name,
  a.spotify_artist_id,
  COUNT(DISTINCT sa.song_id) AS song_count
FROM artists a
LEFT JOIN song_artists sa ON sa.artist_id = a.id
WHERE lower(a.name) LIKE ?1 ESCAPE '\'
GROUP BY a.id
ORDER BY a.name
LIMIT ?2
"#;

const ARTIST_DETAIL_SQL: &str = r#"
SELECT
  a.id                AS artist_id,
  a.name              AS artist_name,
  a.spotify_artist_id AS spotify_artist_id,
  s.id                AS song_id,
  s.title             AS song_title,
  s.spotify_track_id  AS spotify_track_id,
  v.id                AS video_id,
  v.title             AS video_title,
  v.youtube_video_id  AS youtube_video_id
FROM artists a
LEFT JOIN song_artists sa ON sa.artist_id = a.id
LEFT JOIN songs s         ON s.id = sa.song_id
LEFT JOIN video_songs vs  ON vs.song_id = s.id
LEFT JOIN videos v        ON v.id = vs.video_id
WHERE a.id = ?1
ORDER BY s.title, s.id, v.title, v.id
"#;

pub async fn search_artists(
    source: &dyn RowSource,
    term: &SearchTerm,
    limit: SearchLimit,
) -> Result<Vec<ArtistSummary>> {
    let query = SqlQuery::new("search_artists", SEARCH_ARTISTS_SQL)
        .bind(term.like_pattern())
        .bind(limit.get());
    let rows = source.fetch_all(&query).await?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            Some(ArtistSummary {
                id: row.int("id")?,
                name: row.text("name").unwrap_or_default(),
                spotify_artist_id: row.text("spotify_artist_id"),
                song_count: row.int("song_count").unwrap_or(0),
            })
        })
        .collect())
}

pub async fn artist_detail(
    source: &dyn RowSource,
    artist_id: i64,
) -> Result<Option<ArtistDetail>> {
    let query = SqlQuery::new("artist_detail", ARTIST_DETAIL_SQL).bind(artist_id);
    let rows = source.fetch_all(&query).await?;
    Ok(fold_artist_detail(&rows))
}

struct SongBuilder {
    song: ArtistSong,
    videos: ChildList<i64, ArtistVideo>,
}

pub(crate) fn fold_artist_detail(rows: &[FlatRow]) -> Option<ArtistDetail> {
    let root = root_row(rows, "artist_id", &["artist_name", "spotify_artist_id"])?;

    let mut songs: OrderedGroups<i64, SongBuilder> = OrderedGroups::new();
    for row in rows {
        let Some(song) = songs.group(row.int("song_id"), || SongBuilder {
            song: ArtistSong {
                id: row.int("song_id").unwrap_or_default(),
                title: row.text("song_title").unwrap_or_default(),
                spotify_track_id: row.text("spotify_track_id"),
                videos: Vec::new(),
            },
            videos: ChildList::new(),
        }) else {
            continue;
        };

        song.videos.push(row.int("video_id"), || ArtistVideo {
            id: row.int("video_id").unwrap_or_default(),
            title: row.text("video_title").unwrap_or_default(),
            youtube_video_id: row.text("youtube_video_id"),
        });
    }

    Some(ArtistDetail {
        id: root.int("artist_id")?,
        name: root.text("artist_name").unwrap_or_default(),
        spotify_artist_id: root.text("spotify_artist_id"),
        songs: songs
            .into_values()
            .into_iter()
            .map(|builder| ArtistSong {
                videos: builder.videos.into_vec(),
                ..builder.song
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(song: Option<(i64, &str)>, video: Option<(i64, &str)>) -> FlatRow {
        FlatRow::new()
            .with("artist_id", 3)
            .with("artist_name", "Tyler Toney")
            .with("spotify_artist_id", None::<String>)
            .with("song_id", song.map(|(id, _)| id))
            .with("song_title", song.map(|(_, title)| title))
            .with("video_id", video.map(|(id, _)| id))
            .with("video_title", video.map(|(_, title)| title))
    }

    #[test]
    fn test_songs_group_videos_without_duplicates() {
        let rows = vec![
            row(Some((1, "Anthem")), Some((20, "Battle A"))),
            row(Some((1, "Anthem")), Some((21, "Battle B"))),
            row(Some((1, "Anthem")), Some((20, "Battle A"))),
            row(Some((2, "Ballad")), None),
        ];

        let artist = fold_artist_detail(&rows).unwrap();
        assert_eq!(artist.songs.len(), 2);
        assert_eq!(
            artist.songs[0].videos.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![20, 21]
        );
        assert!(artist.songs[1].videos.is_empty());
    }

    #[test]
    fn test_artist_without_songs() {
        let artist = fold_artist_detail(&[row(None, None)]).unwrap();
        assert_eq!(artist.name, "Tyler Toney");
        assert!(artist.songs.is_empty());
    }

    #[test]
    fn test_song_order_follows_rows() {
        let rows = vec![
            row(Some((9, "Zed")), None),
            row(Some((4, "Alpha")), None),
            row(Some((9, "Zed")), Some((1, "V"))),
        ];
        let artist = fold_artist_detail(&rows).unwrap();
        assert_eq!(artist.songs.iter().map(|s| s.id).collect::<Vec<_>>(), vec![9, 4]);
        assert_eq!(artist.songs[0].videos.len(), 1);
    }
}
