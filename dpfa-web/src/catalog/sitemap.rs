//! Identifiers enumerated for the sitemap

use dpfa_common::{Result, RowSource, SqlQuery};

use super::categories::{list_categories, Category};

/// Everything the sitemap links to besides the static pages
#[derive(Debug, Clone, Default)]
pub struct SitemapEntries {
    pub categories: Vec<Category>,
    pub video_ids: Vec<i64>,
    pub song_ids: Vec<i64>,
    pub artist_ids: Vec<i64>,
}

async fn ids(source: &dyn RowSource, query: SqlQuery) -> Result<Vec<i64>> {
    let rows = source.fetch_all(&query).await?;
    Ok(rows.iter().filter_map(|row| row.int("id")).collect())
}

pub async fn sitemap_entries(source: &dyn RowSource) -> Result<SitemapEntries> {
    Ok(SitemapEntries {
        categories: list_categories(source).await?,
        video_ids: ids(
            source,
            SqlQuery::new("sitemap_videos", "SELECT id FROM videos ORDER BY id"),
        )
        .await?,
        song_ids: ids(
            source,
            SqlQuery::new("sitemap_songs", "SELECT id FROM songs ORDER BY id"),
        )
        .await?,
        artist_ids: ids(
            source,
            SqlQuery::new("sitemap_artists", "SELECT id FROM artists ORDER BY id"),
        )
        .await?,
    })
}
