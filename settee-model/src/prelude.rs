//! Snapshot of the types surface for presentation layers.
//! Prefer importing from this module instead of individual tree nodes when
//! wiring screens against the core.

pub use super::checkpoint::{
    FAVORITES_KEY, PROGRESS_KEY_PREFIX, PlaybackCheckpoint,
};
pub use super::favorites::{FavoriteChange, FavoriteSet};
pub use super::ids::VideoId;
pub use super::video::{PlaybackTarget, Video};
