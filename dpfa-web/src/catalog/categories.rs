//! Video categories and per-category video listings

use dpfa_common::{FlatRow, Result, RowSource, SqlQuery};
use serde::Serialize;

use super::search::SearchTerm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(skip_serializing)]
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVideo {
    pub id: i64,
    pub title: String,
    pub published_at: Option<String>,
    pub song_count: i64,
}

const LIST_CATEGORIES_SQL: &str = r#"
SELECT id, slug, title, description
FROM video_categories
WHERE is_active = 1
ORDER BY sort_order, title
"#;

const CATEGORY_BY_SLUG_SQL: &str = r#"
SELECT id, slug, title, description
FROM video_categories
WHERE slug = ?1 AND is_active = 1
LIMIT 1
"#;

const CATEGORY_VIDEOS_SQL: &str = r#"
SELECT
  v.id,
  v.title,
  v.published_at,
  COUNT(DISTINCT vs.song_id) AS song_count
FROM video_category_videos vcv
JOIN videos v ON v.id = vcv.video_id
LEFT JOIN video_songs vs ON vs.video_id = v.id
WHERE vcv.category_id = ?1
  AND (?2 IS NULL OR lower(v.title) LIKE ?2 ESCAPE '\')
GROUP BY v.id, vcv.rank
ORDER BY
  vcv.rank NULLS LAST,
  v.published_at DESC NULLS LAST,
  v.id DESC
"#;

fn category(row: &FlatRow) -> Option<Category> {
    Some(Category {
        id: row.int("id")?,
        slug: row.text("slug")?,
        title: row.text("title").unwrap_or_default(),
        description: row.text("description"),
    })
}

/// Active categories in display order
pub async fn list_categories(source: &dyn RowSource) -> Result<Vec<Category>> {
    let rows = source
        .fetch_all(&SqlQuery::new("list_categories", LIST_CATEGORIES_SQL))
        .await?;
    Ok(rows.iter().filter_map(category).collect())
}

/// Active category by slug; inactive categories are not found
pub async fn category_by_slug(source: &dyn RowSource, slug: &str) -> Result<Option<Category>> {
    let query = SqlQuery::new("category_by_slug", CATEGORY_BY_SLUG_SQL).bind(slug);
    Ok(source
        .fetch_optional(&query)
        .await?
        .as_ref()
        .and_then(category))
}

/// Videos in a category, optionally filtered by a title substring
pub async fn videos_for_category(
    source: &dyn RowSource,
    category_id: i64,
    filter: Option<&SearchTerm>,
) -> Result<Vec<CategoryVideo>> {
    let query = SqlQuery::new("category_videos", CATEGORY_VIDEOS_SQL)
        .bind(category_id)
        .bind(filter.map(SearchTerm::like_pattern));
    let rows = source.fetch_all(&query).await?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            Some(CategoryVideo {
                id: row.int("id")?,
                title: row.text("title").unwrap_or_default(),
                published_at: row.text("published_at"),
                song_count: row.int("song_count").unwrap_or(0),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpfa_common::db::FixtureRowSource;
    use dpfa_common::Param;

    #[tokio::test]
    async fn test_unfiltered_listing_binds_null() {
        let source = FixtureRowSource::new().with_rows_for(
            "category_videos",
            vec![Param::Int(3), Param::Null],
            vec![FlatRow::new()
                .with("id", 8)
                .with("title", "Bottle Flip 2")
                .with("song_count", 2)],
        );

        let videos = videos_for_category(&source, 3, None).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].song_count, 2);
        assert_eq!(videos[0].published_at, None);
    }

    #[tokio::test]
    async fn test_unknown_slug() {
        let source = FixtureRowSource::new();
        assert!(category_by_slug(&source, "nope").await.unwrap().is_none());
    }

    #[test]
    fn test_category_id_not_serialized() {
        let json = serde_json::to_value(Category {
            id: 1,
            slug: "battles".to_string(),
            title: "Battles".to_string(),
            description: None,
        })
        .unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["slug"], "battles");
    }
}
