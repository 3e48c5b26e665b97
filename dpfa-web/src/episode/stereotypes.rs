//! Stereotype skit: characters and who played them

use dpfa_common::aggregate::root_row;
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub name: String,
    pub description: Option<String>,
    pub performers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StereotypesView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub characters: Vec<Character>,
}

const STEREOTYPES_SQL: &str = r#"
SELECT
  s.id            AS skit_id,
  s.title         AS title,
  s.description   AS description,
  c.id            AS character_id,
  c.name          AS character_name,
  c.description   AS character_description,
  p.id            AS performer_id,
  p.performer     AS performer
FROM stereotype_skits s
LEFT JOIN stereotype_characters c ON c.skit_id = s.id
LEFT JOIN stereotype_performers p ON p.character_id = c.id
WHERE s.video_id = ?1
ORDER BY s.id, c.character_order, c.id, p.id
"#;

pub async fn stereotypes_view(
    source: &dyn RowSource,
    video_id: i64,
) -> Result<Option<StereotypesView>> {
    let rows = source
        .fetch_all(&SqlQuery::new("stereotypes", STEREOTYPES_SQL).bind(video_id))
        .await?;
    Ok(fold_stereotypes(&rows))
}

struct CharacterBuilder {
    name: String,
    description: Option<String>,
    performers: ChildList<i64, String>,
}

pub(crate) fn fold_stereotypes(rows: &[FlatRow]) -> Option<StereotypesView> {
    let root = root_row(rows, "skit_id", &["title", "description"])?;
    let skit_id = root.int("skit_id")?;

    let mut characters: OrderedGroups<i64, CharacterBuilder> = OrderedGroups::new();
    for row in rows.iter().filter(|row| row.int("skit_id") == Some(skit_id)) {
        let Some(character) = characters.group(row.int("character_id"), || CharacterBuilder {
            name: row.text("character_name").unwrap_or_default(),
            description: row.text("character_description"),
            performers: ChildList::new(),
        }) else {
            continue;
        };
        if let Some(performer) = row.non_empty_text("performer") {
            character.performers.push(row.int("performer_id"), || performer);
        }
    }

    Some(StereotypesView {
        id: skit_id,
        title: root.text("title").unwrap_or_default(),
        description: root.text("description"),
        characters: characters
            .into_values()
            .into_iter()
            .map(|c| Character {
                name: c.name,
                description: c.description,
                performers: c.performers.into_vec(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(character: Option<(i64, &str)>, performer: Option<(i64, &str)>) -> FlatRow {
        FlatRow::new()
            .with("skit_id", 3)
            .with("title", "Gym Stereotypes")
            .with("character_id", character.map(|(id, _)| id))
            .with("character_name", character.map(|(_, n)| n))
            .with("performer_id", performer.map(|(id, _)| id))
            .with("performer", performer.map(|(_, p)| p))
    }

    #[test]
    fn test_characters_with_performers() {
        let rows = vec![
            row(Some((1, "The Grunter")), Some((1, "Ty"))),
            row(Some((1, "The Grunter")), Some((2, "Cody"))),
            row(Some((2, "The Mirror Flexer")), Some((3, "Garrett"))),
            row(Some((3, "The Spotter")), None),
        ];
        let skit = fold_stereotypes(&rows).unwrap();
        assert_eq!(skit.characters.len(), 3);
        assert_eq!(skit.characters[0].performers, vec!["Ty", "Cody"]);
        assert!(skit.characters[2].performers.is_empty());
    }

    #[test]
    fn test_skit_without_characters() {
        let skit = fold_stereotypes(&[row(None, None)]).unwrap();
        assert_eq!(skit.title, "Gym Stereotypes");
        assert!(skit.characters.is_empty());
    }
}
