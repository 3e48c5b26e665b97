//! Overtime segment kinds and their payload shapes

use serde::Serialize;
use std::collections::BTreeMap;

/// Segment category selected from the segment's canonical type
/// (or its display name when no canonical type is recorded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    CoolOrNotCool,
    WheelUnfortunate,
    Bet,
    RankIt,
    FanMail,
    RoleCall,
    Scoreboard,
    /// Unrecognized segment, carrying the raw display name
    Other(String),
}

impl SegmentKind {
    /// Resolve the dispatch key for a segment row
    pub fn classify(canonical_type: Option<&str>, display_name: &str) -> Self {
        let key = canonical_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(display_name);

        match normalize_key(key).as_str() {
            "cool_or_not_cool" => SegmentKind::CoolOrNotCool,
            "wheel_unfortunate" => SegmentKind::WheelUnfortunate,
            "bet" => SegmentKind::Bet,
            "rank_it" => SegmentKind::RankIt,
            "fan_mail" => SegmentKind::FanMail,
            "role_call" => SegmentKind::RoleCall,
            "scoreboard" => SegmentKind::Scoreboard,
            _ => SegmentKind::Other(display_name.to_string()),
        }
    }

    /// Value reported as `segment_type`
    pub fn segment_type(&self) -> &str {
        match self {
            SegmentKind::CoolOrNotCool => "cool_or_not_cool",
            SegmentKind::WheelUnfortunate => "wheel_unfortunate",
            SegmentKind::Bet => "bet",
            SegmentKind::RankIt => "rank_it",
            SegmentKind::FanMail => "fan_mail",
            SegmentKind::RoleCall => "role_call",
            SegmentKind::Scoreboard => "scoreboard",
            SegmentKind::Other(name) => name,
        }
    }

    /// Human-readable heading
    pub fn label(&self) -> &str {
        match self {
            SegmentKind::CoolOrNotCool => "Cool or Not Cool",
            SegmentKind::WheelUnfortunate => "Wheel Unfortunate",
            SegmentKind::Bet => "Bet",
            SegmentKind::RankIt => "Rank It",
            SegmentKind::FanMail => "Fan Mail",
            SegmentKind::RoleCall => "Role Call",
            SegmentKind::Scoreboard => "Scoreboard",
            SegmentKind::Other(name) => name,
        }
    }
}

/// Lowercase, collapse runs of non-alphanumerics into `_`, trim `_`
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
        } else if !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_matches('_').to_string()
}

/// Two-valued vote cast on a Cool or Not Cool item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Cool,
    NotCool,
}

impl Vote {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_key(raw).as_str() {
            "cool" => Some(Vote::Cool),
            "not_cool" => Some(Vote::NotCool),
            _ => None,
        }
    }
}

/// Overall verdict for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    Cool,
    NotCool,
    Both,
}

/// Majority of the two-valued votes; `Both` on a non-zero tie, `None` when
/// nobody voted
pub fn tally(votes: impl IntoIterator<Item = Vote>) -> Option<VoteOutcome> {
    let (cool, not_cool) = votes
        .into_iter()
        .fold((0usize, 0usize), |(c, n), vote| match vote {
            Vote::Cool => (c + 1, n),
            Vote::NotCool => (c, n + 1),
        });

    match cool.cmp(&not_cool) {
        std::cmp::Ordering::Greater => Some(VoteOutcome::Cool),
        std::cmp::Ordering::Less => Some(VoteOutcome::NotCool),
        std::cmp::Ordering::Equal if cool > 0 => Some(VoteOutcome::Both),
        std::cmp::Ordering::Equal => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastVote {
    pub voter: String,
    pub vote: Vote,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoolItem {
    pub name: String,
    pub presenter: Option<String>,
    pub votes: Vec<CastVote>,
    pub overall: Option<VoteOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelSpin {
    pub spinner: Option<String>,
    pub outcome: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetRecord {
    pub bettor: Option<String>,
    pub description: String,
    pub stakes: Option<String>,
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub entry: String,
    pub ranked_by: Option<String>,
    pub rank: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    pub body: String,
    pub told_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub name: String,
    pub score: Option<f64>,
    /// Human-readable score text, independent of the sort key
    pub display: Option<String>,
}

/// Shape-specific payload of a recognized segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SegmentData {
    CoolOrNotCool { items: Vec<CoolItem> },
    WheelUnfortunate { spin: Option<WheelSpin> },
    Bet { bet: Option<BetRecord> },
    RankIt { entries: Vec<RankedEntry> },
    FanMail { story: Option<Story> },
    RoleCall { roles: BTreeMap<String, String> },
    Scoreboard { scores: Vec<ScoreRow> },
}

/// One segment of an overtime episode.
///
/// Unrecognized segments serialize as `{segment_type: <display name>, data: null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentView {
    pub segment_type: String,
    pub data: Option<SegmentData>,
}
