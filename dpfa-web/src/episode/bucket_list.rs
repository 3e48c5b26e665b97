//! Bucket list attached to a video

use dpfa_common::aggregate::root_row;
use dpfa_common::{ChildList, FlatRow, Result, RowSource, SqlQuery};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketListItem {
    pub title: String,
    pub is_completed: bool,
    pub completed_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketListView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: usize,
    pub items: Vec<BucketListItem>,
}

const BUCKET_LIST_SQL: &str = r#"
SELECT
  l.id            AS bucket_list_id,
  l.title         AS title,
  l.description   AS description,
  i.id            AS item_id,
  i.title         AS item_title,
  i.is_completed  AS is_completed,
  i.completed_by  AS completed_by
FROM bucket_lists l
LEFT JOIN bucket_list_items i ON i.bucket_list_id = l.id
WHERE l.video_id = ?1
ORDER BY l.id, i.item_order, i.id
"#;

pub async fn bucket_list_view(
    source: &dyn RowSource,
    video_id: i64,
) -> Result<Option<BucketListView>> {
    let rows = source
        .fetch_all(&SqlQuery::new("bucket_list", BUCKET_LIST_SQL).bind(video_id))
        .await?;
    Ok(fold_bucket_list(&rows))
}

/// The first list's items; a second list on the same video is ignored
pub(crate) fn fold_bucket_list(rows: &[FlatRow]) -> Option<BucketListView> {
    let root = root_row(rows, "bucket_list_id", &["title", "description"])?;
    let list_id = root.int("bucket_list_id")?;

    let mut items = ChildList::new();
    for row in rows.iter().filter(|row| row.int("bucket_list_id") == Some(list_id)) {
        items.push(row.int("item_id"), || BucketListItem {
            title: row.text("item_title").unwrap_or_default(),
            is_completed: row.flag("is_completed"),
            completed_by: row.non_empty_text("completed_by"),
        });
    }
    let items = items.into_vec();

    Some(BucketListView {
        id: list_id,
        title: root.text("title").unwrap_or_default(),
        description: root.text("description"),
        completed: items.iter().filter(|item| item.is_completed).count(),
        items,
    })
}
