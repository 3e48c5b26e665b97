//! Catalog views over songs, artists, videos and categories
//!
//! Each view builder issues one parameterized query through a
//! [`RowSource`](dpfa_common::RowSource) and folds the joined rows into a
//! nested, serializable view. `Ok(None)` means the entity does not exist.

pub mod artists;
pub mod categories;
pub mod search;
pub mod sitemap;
pub mod songs;
pub mod videos;

pub use artists::{artist_detail, search_artists, ArtistDetail, ArtistSummary};
pub use categories::{category_by_slug, list_categories, videos_for_category, Category, CategoryVideo};
pub use search::{SearchLimit, SearchTerm};
pub use songs::{search_songs, song_by_track_id, song_detail, SongDetail, SongSummary};
pub use videos::{search_videos, video_detail, VideoDetail, VideoSummary};
