//! Battle view: header, player roster and round-by-round timeline

use dpfa_common::aggregate::root_row;
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattlePlayer {
    pub name: String,
    pub is_guest: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<BattlePlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    pub name: String,
    pub status: Option<String>,
    pub placement: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round {
    pub name: String,
    pub results: Vec<RoundResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleView {
    pub id: i64,
    pub name: String,
    pub video_title: String,
    pub winner: Option<String>,
    pub format: &'static str,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub teams: Vec<Team>,
    pub timeline: Vec<Round>,
    pub final_standings: Vec<RoundResult>,
}

const BATTLE_SQL: &str = r#"
SELECT
  b.id          AS battle_id,
  b.winner      AS winner,
  b.notes       AS notes,
  d.name        AS definition_name,
  d.description AS description,
  v.title       AS video_title
FROM battles b
JOIN battle_definitions d ON d.id = b.definition_id
JOIN videos v ON v.id = b.video_id
WHERE v.id = ?1
ORDER BY b.id
LIMIT 1
"#;

const PLAYERS_SQL: &str = r#"
SELECT name, is_guest, notes
FROM battle_players
WHERE battle_id = ?1
ORDER BY is_guest, name
"#;

const ROUNDS_SQL: &str = r#"
SELECT
  r.id          AS round_id,
  r.name        AS round_name,
  p.id          AS participant_id,
  p.name        AS participant_name,
  p.status      AS status,
  p.placement   AS placement,
  p.notes       AS participant_notes
FROM battle_rounds r
LEFT JOIN battle_round_participants p ON p.battle_round_id = r.id
WHERE r.battle_id = ?1
ORDER BY r.round_order, r.id, p.placement NULLS LAST, p.name
"#;

/// Battle recorded for a video, `None` if the video is not a battle
pub async fn battle_view(source: &dyn RowSource, video_id: i64) -> Result<Option<BattleView>> {
    let header_rows = source
        .fetch_all(&SqlQuery::new("battle", BATTLE_SQL).bind(video_id))
        .await?;
    let Some(header) = root_row(&header_rows, "battle_id", &["winner", "definition_name"]) else {
        return Ok(None);
    };
    let Some(battle_id) = header.int("battle_id") else {
        return Ok(None);
    };

    let players = source
        .fetch_all(&SqlQuery::new("battle_players", PLAYERS_SQL).bind(battle_id))
        .await?;
    let rounds = source
        .fetch_all(&SqlQuery::new("battle_rounds", ROUNDS_SQL).bind(battle_id))
        .await?;

    Ok(Some(BattleView {
        id: battle_id,
        name: header.text("definition_name").unwrap_or_default(),
        video_title: header.text("video_title").unwrap_or_default(),
        winner: header.non_empty_text("winner"),
        format: "standard",
        description: header.text("description"),
        notes: header.text("notes"),
        teams: vec![Team {
            name: "Players".to_string(),
            players: players.iter().map(player).collect(),
        }],
        timeline: fold_timeline(&rounds),
        final_standings: Vec::new(),
    }))
}

fn player(row: &FlatRow) -> BattlePlayer {
    BattlePlayer {
        name: row.text("name").unwrap_or_default(),
        is_guest: row.flag("is_guest"),
        notes: row.text("notes"),
    }
}

struct RoundBuilder {
    name: String,
    results: ChildList<i64, RoundResult>,
}

/// Rounds → participant results; a round nobody played keeps an empty list
pub(crate) fn fold_timeline(rows: &[FlatRow]) -> Vec<Round> {
    let mut rounds: OrderedGroups<i64, RoundBuilder> = OrderedGroups::new();

    for row in rows {
        let Some(round) = rounds.group(row.int("round_id"), || RoundBuilder {
            name: row.text("round_name").unwrap_or_default(),
            results: ChildList::new(),
        }) else {
            continue;
        };
        round.results.push(row.int("participant_id"), || RoundResult {
            name: row.text("participant_name").unwrap_or_default(),
            status: row.text("status"),
            placement: row.int("placement"),
            notes: row.text("participant_notes"),
        });
    }

    rounds
        .into_values()
        .into_iter()
        .map(|round| Round {
            name: round.name,
            results: round.results.into_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpfa_common::db::FixtureRowSource;

    fn round_row(round: i64, name: &str, participant: Option<(i64, &str, i64)>) -> FlatRow {
        FlatRow::new()
            .with("round_id", round)
            .with("round_name", name)
            .with("participant_id", participant.map(|(id, _, _)| id))
            .with("participant_name", participant.map(|(_, n, _)| n))
            .with("placement", participant.map(|(_, _, p)| p))
    }

    #[test]
    fn test_timeline_keeps_empty_round() {
        let rows = vec![
            round_row(1, "Round 1", Some((10, "Cody", 1))),
            round_row(1, "Round 1", Some((11, "Ty", 2))),
            round_row(2, "Tiebreaker", None),
            round_row(3, "Final", Some((12, "Cody", 1))),
        ];

        let timeline = fold_timeline(&rows);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].results.len(), 2);
        assert_eq!(timeline[0].results[1].name, "Ty");
        assert!(timeline[1].results.is_empty());
        assert_eq!(timeline[2].name, "Final");
    }

    #[tokio::test]
    async fn test_not_a_battle_runs_only_header_query() {
        let source = FixtureRowSource::new();
        assert!(battle_view(&source, 4).await.unwrap().is_none());
        assert_eq!(source.executed(), vec!["battle"]);
    }

    #[tokio::test]
    async fn test_battle_shape() {
        let source = FixtureRowSource::new()
            .with_rows(
                "battle",
                vec![FlatRow::new()
                    .with("battle_id", 9)
                    .with("winner", "Coby")
                    .with("definition_name", "Ping Pong Trick Shots")
                    .with("video_title", "Ping Pong Trick Shots 5")],
            )
            .with_rows(
                "battle_players",
                vec![
                    FlatRow::new().with("name", "Coby").with("is_guest", 0),
                    FlatRow::new().with("name", "Guest Star").with("is_guest", 1),
                ],
            );

        let battle = battle_view(&source, 4).await.unwrap().unwrap();
        assert_eq!(battle.winner.as_deref(), Some("Coby"));
        assert_eq!(battle.teams.len(), 1);
        assert_eq!(battle.teams[0].name, "Players");
        assert!(battle.teams[0].players[1].is_guest);
        assert!(battle.timeline.is_empty());

        let json = serde_json::to_value(&battle).unwrap();
        assert_eq!(json["format"], "standard");
        assert_eq!(json["final_standings"], serde_json::json!([]));
    }
}
