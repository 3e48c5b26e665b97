//! Episode content attached to a video
//!
//! A video may carry any combination of a battle, an overtime episode, a
//! bucket list and a stereotype skit. Each is queried independently and is
//! absent (`None`) when the video has none.

pub mod battle;
pub mod bucket_list;
pub mod overtime;
pub mod segments;
pub mod stereotypes;

use dpfa_common::{Result, RowSource};
use serde::Serialize;

use crate::catalog::{video_detail, VideoDetail};

pub use battle::{battle_view, BattleView};
pub use bucket_list::{bucket_list_view, BucketListView};
pub use overtime::{overtime_view, OvertimeView};
pub use segments::{SegmentData, SegmentKind, SegmentView};
pub use stereotypes::{stereotypes_view, StereotypesView};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeView {
    pub video: VideoDetail,
    pub battle: Option<BattleView>,
    pub overtime: Option<OvertimeView>,
    pub bucket_list: Option<BucketListView>,
    pub stereotypes: Option<StereotypesView>,
}

/// Everything known about one video, `None` if the video does not exist
pub async fn episode_view(source: &dyn RowSource, video_id: i64) -> Result<Option<EpisodeView>> {
    let Some(video) = video_detail(source, video_id).await? else {
        return Ok(None);
    };

    Ok(Some(EpisodeView {
        video,
        battle: battle_view(source, video_id).await?,
        overtime: overtime_view(source, video_id).await?,
        bucket_list: bucket_list_view(source, video_id).await?,
        stereotypes: stereotypes_view(source, video_id).await?,
    }))
}
