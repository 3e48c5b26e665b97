//! Video pages, including the full episode breakdown

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use super::layout::{escape_html, link, list_or, page, search_form};
use super::PageQuery;
use crate::catalog::{search_videos, SearchLimit, VideoDetail};
use crate::episode::segments::VoteOutcome;
use crate::episode::{
    episode_view, BattleView, BucketListView, EpisodeView, OvertimeView, SegmentData,
    SegmentKind, SegmentView, StereotypesView,
};
use crate::error::{PageError, PageResult};
use crate::AppState;

/// GET /videos?q=
pub async fn videos_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let term = query.term()?;
    let results = match &term {
        Some(term) => Some(search_videos(state.source.as_ref(), term, SearchLimit::default()).await?),
        None => None,
    };

    let mut body = format!(
        "<h1>Videos</h1>\n{}\n<p>{}</p>\n",
        search_form("/videos", "Video title", term.as_ref().map(|t| t.as_str())),
        link("/videos/categories", "Browse by category")
    );
    if let Some(results) = results {
        body.push_str(&list_or(
            results.iter().map(|video| {
                format!(
                    "{} <span class=\"muted\">{} songs</span>",
                    link(&format!("/videos/{}", video.id), &video.title),
                    video.song_count
                )
            }),
            "No videos found.",
        ));
    }
    Ok(Html(page("Videos", &body)))
}

/// GET /videos/:id
pub async fn video_detail_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let episode = episode_view(state.source.as_ref(), id)
        .await?
        .ok_or_else(|| PageError::not_found(format!("Video {}", id)))?;
    Ok(Html(page(&episode.video.title, &render_episode(&episode))))
}

pub(crate) fn render_episode(episode: &EpisodeView) -> String {
    let mut body = render_video(&episode.video);
    if let Some(battle) = &episode.battle {
        body.push_str(&render_battle(battle));
    }
    if let Some(overtime) = &episode.overtime {
        body.push_str(&render_overtime(overtime));
    }
    if let Some(list) = &episode.bucket_list {
        body.push_str(&render_bucket_list(list));
    }
    if let Some(skit) = &episode.stereotypes {
        body.push_str(&render_stereotypes(skit));
    }
    body
}

fn render_video(video: &VideoDetail) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape_html(&video.title));
    if let Some(published) = &video.published_at {
        body.push_str(&format!("<p class=\"muted\">Published {}</p>\n", escape_html(published)));
    }
    if let Some(youtube) = &video.youtube_video_id {
        body.push_str(&format!(
            "<p>{}</p>\n",
            link(&format!("https://www.youtube.com/watch?v={}", youtube), "Watch on YouTube")
        ));
    }
    body.push_str("<h2>Songs</h2>\n");
    body.push_str(&list_or(
        video.songs.iter().map(|song| {
            let by = if song.artists.is_empty() {
                String::new()
            } else {
                format!(" <span class=\"muted\">by {}</span>", escape_html(&song.artists.join(", ")))
            };
            format!("{}{}", link(&format!("/songs/{}", song.id), &song.title), by)
        }),
        "No songs identified in this video yet.",
    ));
    body
}

fn render_battle(battle: &BattleView) -> String {
    let mut body = format!("<h2>Battle: {}</h2>\n", escape_html(&battle.name));
    if let Some(winner) = &battle.winner {
        body.push_str(&format!("<p><strong>Winner:</strong> {}</p>\n", escape_html(winner)));
    }
    if let Some(description) = &battle.description {
        body.push_str(&format!("<p>{}</p>\n", escape_html(description)));
    }
    for team in &battle.teams {
        body.push_str(&format!("<h3>{}</h3>\n", escape_html(&team.name)));
        body.push_str(&list_or(
            team.players.iter().map(|player| {
                let guest = if player.is_guest { " <span class=\"muted\">(guest)</span>" } else { "" };
                format!("{}{}", escape_html(&player.name), guest)
            }),
            "No players recorded.",
        ));
    }
    for round in &battle.timeline {
        body.push_str(&format!("<h3>{}</h3>\n", escape_html(&round.name)));
        body.push_str(&list_or(
            round.results.iter().map(|result| {
                let place = result.placement.map(|p| format!("#{} ", p)).unwrap_or_default();
                let status = result
                    .status
                    .as_deref()
                    .map(|s| format!(" <span class=\"muted\">{}</span>", escape_html(s)))
                    .unwrap_or_default();
                format!("{}{}{}", place, escape_html(&result.name), status)
            }),
            "No results recorded.",
        ));
    }
    if let Some(notes) = &battle.notes {
        body.push_str(&format!("<p class=\"muted\">{}</p>\n", escape_html(notes)));
    }
    body
}

fn render_overtime(overtime: &OvertimeView) -> String {
    let heading = match overtime.episode_number {
        Some(n) => format!("Overtime #{}", n),
        None => "Overtime".to_string(),
    };
    let mut body = format!("<h2>{}</h2>\n", escape_html(&heading));
    for segment in &overtime.segments {
        body.push_str(&render_segment(segment));
    }
    body
}

fn outcome_label(outcome: Option<VoteOutcome>) -> &'static str {
    match outcome {
        Some(VoteOutcome::Cool) => "Cool",
        Some(VoteOutcome::NotCool) => "Not Cool",
        Some(VoteOutcome::Both) => "Split",
        None => "No votes",
    }
}

fn by(actor: &Option<String>) -> String {
    actor
        .as_deref()
        .map(|name| format!(" <span class=\"muted\">({})</span>", escape_html(name)))
        .unwrap_or_default()
}

fn render_segment(segment: &SegmentView) -> String {
    let kind = SegmentKind::classify(Some(segment.segment_type.as_str()), &segment.segment_type);
    let mut body = format!(
        "<div class=\"segment\">\n<h3>{}</h3>\n",
        escape_html(kind.label())
    );

    let content = match &segment.data {
        Some(SegmentData::CoolOrNotCool { items }) => list_or(
            items.iter().map(|item| {
                format!(
                    "{}{}: <strong>{}</strong>",
                    escape_html(&item.name),
                    by(&item.presenter),
                    outcome_label(item.overall)
                )
            }),
            "No items.",
        ),
        Some(SegmentData::WheelUnfortunate { spin: Some(spin) }) => {
            format!("<p>{}{}</p>\n", escape_html(&spin.outcome), by(&spin.spinner))
        }
        Some(SegmentData::Bet { bet: Some(bet) }) => {
            let outcome = bet
                .outcome
                .as_deref()
                .map(|o| format!(" <strong>{}</strong>", escape_html(o)))
                .unwrap_or_default();
            format!("<p>{}{}{}</p>\n", escape_html(&bet.description), by(&bet.bettor), outcome)
        }
        Some(SegmentData::RankIt { entries }) => list_or(
            entries.iter().map(|entry| {
                let rank = entry.rank.map(|r| format!("#{} ", r)).unwrap_or_default();
                format!("{}{}{}", rank, escape_html(&entry.entry), by(&entry.ranked_by))
            }),
            "No rankings.",
        ),
        Some(SegmentData::FanMail { story: Some(story) }) => {
            format!("<p>{}{}</p>\n", escape_html(&story.body), by(&story.told_by))
        }
        Some(SegmentData::RoleCall { roles }) => list_or(
            roles
                .iter()
                .map(|(role, name)| format!("{}: {}", escape_html(role), escape_html(name))),
            "No roles.",
        ),
        Some(SegmentData::Scoreboard { scores }) => list_or(
            scores.iter().map(|row| {
                let shown = row
                    .display
                    .clone()
                    .or_else(|| row.score.map(|s| s.to_string()))
                    .unwrap_or_else(|| "-".to_string());
                format!("{}: {}", escape_html(&row.name), escape_html(&shown))
            }),
            "No scores.",
        ),
        Some(_) => "<p class=\"muted\">Details not recorded.</p>\n".to_string(),
        None => String::new(),
    };

    body.push_str(&content);
    body.push_str("</div>\n");
    body
}

fn render_bucket_list(list: &BucketListView) -> String {
    let mut body = format!(
        "<h2>{}</h2>\n<p class=\"muted\">{} of {} completed</p>\n",
        escape_html(&list.title),
        list.completed,
        list.items.len()
    );
    body.push_str(&list_or(
        list.items.iter().map(|item| {
            let mark = if item.is_completed { "&#10003; " } else { "" };
            format!("{}{}{}", mark, escape_html(&item.title), by(&item.completed_by))
        }),
        "Nothing on the list yet.",
    ));
    body
}

fn render_stereotypes(skit: &StereotypesView) -> String {
    let mut body = format!("<h2>{}</h2>\n", escape_html(&skit.title));
    body.push_str(&list_or(
        skit.characters.iter().map(|character| {
            let played_by = if character.performers.is_empty() {
                String::new()
            } else {
                format!(
                    " <span class=\"muted\">played by {}</span>",
                    escape_html(&character.performers.join(", "))
                )
            };
            format!("{}{}", escape_html(&character.name), played_by)
        }),
        "No characters recorded.",
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_segment_renders_heading_only() {
        let html = render_segment(&SegmentView {
            segment_type: "Mystery <Segment>".to_string(),
            data: None,
        });
        assert!(html.contains("<h3>Mystery &lt;Segment&gt;</h3>"));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_missing_spin_renders_placeholder() {
        let html = render_segment(&SegmentView {
            segment_type: "wheel_unfortunate".to_string(),
            data: Some(SegmentData::WheelUnfortunate { spin: None }),
        });
        assert!(html.contains("Wheel Unfortunate"));
        assert!(html.contains("Details not recorded."));
    }
}
