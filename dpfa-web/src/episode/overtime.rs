//! Overtime episode view: episode header plus typed segments
//!
//! Each segment is classified by [`SegmentKind`] and filled by its own
//! sub-query. A segment whose sub-record is missing keeps its slot with a
//! null payload field; an unrecognized segment gets no payload at all.

use dpfa_common::aggregate::{sort_desc_nulls_last, sort_nulls_last};
use dpfa_common::{ChildList, FlatRow, OrderedGroups, Result, RowSource, SqlQuery};
use serde::Serialize;
use std::collections::BTreeMap;

use super::segments::{
    tally, BetRecord, CastVote, CoolItem, RankedEntry, ScoreRow, SegmentData, SegmentKind,
    SegmentView, Story, Vote, WheelSpin,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertimeView {
    pub id: i64,
    pub video_id: i64,
    pub episode_number: Option<i64>,
    pub notes: Option<String>,
    pub segments: Vec<SegmentView>,
}

const EPISODE_SQL: &str = r#"
SELECT id AS episode_id, video_id, episode_number, notes
FROM overtime_episodes
WHERE video_id = ?1
ORDER BY id
LIMIT 1
"#;

const SEGMENTS_SQL: &str = r#"
SELECT id, name, canonical_type
FROM overtime_segments
WHERE episode_id = ?1
ORDER BY segment_order, id
"#;

const COOL_ITEMS_SQL: &str = r#"
SELECT
  i.id        AS item_id,
  i.name      AS item_name,
  i.presenter AS presenter,
  v.id        AS vote_id,
  v.voter     AS voter,
  v.vote      AS vote
FROM overtime_cnc_items i
LEFT JOIN overtime_cnc_votes v ON v.item_id = i.id
WHERE i.segment_id = ?1
ORDER BY i.item_order, i.id, v.id
"#;

const WHEEL_SPIN_SQL: &str = r#"
SELECT spinner, outcome, notes
FROM overtime_wheel_spins
WHERE segment_id = ?1
LIMIT 1
"#;

const BET_SQL: &str = r#"
SELECT bettor, description, stakes, outcome
FROM overtime_bets
WHERE segment_id = ?1
LIMIT 1
"#;

const RANKINGS_SQL: &str = r#"
SELECT entry, ranked_by, rank
FROM overtime_rankings
WHERE segment_id = ?1
ORDER BY rank NULLS LAST, id
"#;

const STORY_SQL: &str = r#"
SELECT body, told_by
FROM overtime_stories
WHERE segment_id = ?1
LIMIT 1
"#;

const ROLES_SQL: &str = r#"
SELECT role, name
FROM overtime_roles
WHERE segment_id = ?1
ORDER BY id
"#;

const SCORES_SQL: &str = r#"
SELECT name, score, display
FROM overtime_scores
WHERE segment_id = ?1
ORDER BY score DESC NULLS LAST, id
"#;

/// Overtime episode attached to a video, `None` if the video has none
pub async fn overtime_view(source: &dyn RowSource, video_id: i64) -> Result<Option<OvertimeView>> {
    let episode = source
        .fetch_optional(&SqlQuery::new("overtime_episode", EPISODE_SQL).bind(video_id))
        .await?;
    let Some(episode) = episode else {
        return Ok(None);
    };
    let Some(episode_id) = episode.int("episode_id") else {
        return Ok(None);
    };

    let segment_rows = source
        .fetch_all(&SqlQuery::new("overtime_segments", SEGMENTS_SQL).bind(episode_id))
        .await?;

    let mut segments = Vec::with_capacity(segment_rows.len());
    for row in &segment_rows {
        let Some(segment_id) = row.int("id") else {
            continue;
        };
        let name = row.text("name").unwrap_or_default();
        let kind = SegmentKind::classify(row.text("canonical_type").as_deref(), &name);
        segments.push(segment_view(source, segment_id, kind).await?);
    }

    Ok(Some(OvertimeView {
        id: episode_id,
        video_id: episode.int("video_id").unwrap_or(video_id),
        episode_number: episode.int("episode_number"),
        notes: episode.text("notes"),
        segments,
    }))
}

async fn segment_rows(
    source: &dyn RowSource,
    name: &'static str,
    sql: &'static str,
    segment_id: i64,
) -> Result<Vec<FlatRow>> {
    source
        .fetch_all(&SqlQuery::new(name, sql).bind(segment_id))
        .await
}

async fn segment_row(
    source: &dyn RowSource,
    name: &'static str,
    sql: &'static str,
    segment_id: i64,
) -> Result<Option<FlatRow>> {
    source
        .fetch_optional(&SqlQuery::new(name, sql).bind(segment_id))
        .await
}

/// Run the sub-query for `kind` and shape its payload
pub async fn segment_view(
    source: &dyn RowSource,
    segment_id: i64,
    kind: SegmentKind,
) -> Result<SegmentView> {
    let data = match &kind {
        SegmentKind::CoolOrNotCool => {
            let rows = segment_rows(source, "overtime_cool_items", COOL_ITEMS_SQL, segment_id).await?;
            Some(SegmentData::CoolOrNotCool {
                items: fold_cool_items(&rows),
            })
        }
        SegmentKind::WheelUnfortunate => {
            let row = segment_row(source, "overtime_wheel_spin", WHEEL_SPIN_SQL, segment_id).await?;
            Some(SegmentData::WheelUnfortunate {
                spin: row.as_ref().map(wheel_spin),
            })
        }
        SegmentKind::Bet => {
            let row = segment_row(source, "overtime_bet", BET_SQL, segment_id).await?;
            Some(SegmentData::Bet {
                bet: row.as_ref().map(bet_record),
            })
        }
        SegmentKind::RankIt => {
            let rows = segment_rows(source, "overtime_rankings", RANKINGS_SQL, segment_id).await?;
            Some(SegmentData::RankIt {
                entries: ranked_entries(&rows),
            })
        }
        SegmentKind::FanMail => {
            let row = segment_row(source, "overtime_story", STORY_SQL, segment_id).await?;
            Some(SegmentData::FanMail {
                story: row.as_ref().map(|row| Story {
                    body: row.text("body").unwrap_or_default(),
                    told_by: row.non_empty_text("told_by"),
                }),
            })
        }
        SegmentKind::RoleCall => {
            let rows = segment_rows(source, "overtime_roles", ROLES_SQL, segment_id).await?;
            Some(SegmentData::RoleCall {
                roles: role_map(&rows),
            })
        }
        SegmentKind::Scoreboard => {
            let rows = segment_rows(source, "overtime_scores", SCORES_SQL, segment_id).await?;
            Some(SegmentData::Scoreboard {
                scores: leaderboard(&rows),
            })
        }
        SegmentKind::Other(_) => None,
    };

    Ok(SegmentView {
        segment_type: kind.segment_type().to_string(),
        data,
    })
}

struct ItemBuilder {
    name: String,
    presenter: Option<String>,
    votes: ChildList<i64, CastVote>,
}

/// Items → votes; votes other than cool/not cool are dropped
pub(crate) fn fold_cool_items(rows: &[FlatRow]) -> Vec<CoolItem> {
    let mut items: OrderedGroups<i64, ItemBuilder> = OrderedGroups::new();

    for row in rows {
        let Some(item) = items.group(row.int("item_id"), || ItemBuilder {
            name: row.text("item_name").unwrap_or_default(),
            presenter: row.non_empty_text("presenter"),
            votes: ChildList::new(),
        }) else {
            continue;
        };

        let Some(vote) = row.text("vote").as_deref().and_then(Vote::parse) else {
            continue;
        };
        item.votes.push(row.int("vote_id"), || CastVote {
            voter: row.text("voter").unwrap_or_default(),
            vote,
        });
    }

    items
        .into_values()
        .into_iter()
        .map(|item| {
            let votes = item.votes.into_vec();
            let overall = tally(votes.iter().map(|v| v.vote));
            CoolItem {
                name: item.name,
                presenter: item.presenter,
                votes,
                overall,
            }
        })
        .collect()
}

fn wheel_spin(row: &FlatRow) -> WheelSpin {
    WheelSpin {
        spinner: row.non_empty_text("spinner"),
        outcome: row.text("outcome").unwrap_or_default(),
        notes: row.text("notes"),
    }
}

fn bet_record(row: &FlatRow) -> BetRecord {
    BetRecord {
        bettor: row.non_empty_text("bettor"),
        description: row.text("description").unwrap_or_default(),
        stakes: row.text("stakes"),
        outcome: row.text("outcome"),
    }
}

/// Placement order, unranked entries last
pub(crate) fn ranked_entries(rows: &[FlatRow]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = rows
        .iter()
        .map(|row| RankedEntry {
            entry: row.text("entry").unwrap_or_default(),
            ranked_by: row.non_empty_text("ranked_by"),
            rank: row.int("rank"),
        })
        .collect();
    sort_nulls_last(&mut entries, |entry| entry.rank);
    entries
}

/// Role → name; a repeated role keeps the last name seen
pub(crate) fn role_map(rows: &[FlatRow]) -> BTreeMap<String, String> {
    let mut roles = BTreeMap::new();
    for row in rows {
        if let (Some(role), Some(name)) = (row.non_empty_text("role"), row.text("name")) {
            roles.insert(role, name);
        }
    }
    roles
}

/// Highest score first, unscored rows last
pub(crate) fn leaderboard(rows: &[FlatRow]) -> Vec<ScoreRow> {
    let mut scores: Vec<ScoreRow> = rows
        .iter()
        .map(|row| ScoreRow {
            name: row.text("name").unwrap_or_default(),
            score: row.number("score"),
            display: row.text("display"),
        })
        .collect();
    sort_desc_nulls_last(&mut scores, |score| score.score);
    scores
}
