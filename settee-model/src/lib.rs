//! Core data model definitions shared across settee crates.
#![allow(missing_docs)]

pub mod checkpoint;
pub mod error;
pub mod favorites;
pub mod ids;
pub mod prelude;
pub mod video;

pub use checkpoint::{FAVORITES_KEY, PROGRESS_KEY_PREFIX, PlaybackCheckpoint};
pub use error::{ModelError, Result};
pub use favorites::{FavoriteChange, FavoriteSet};
pub use ids::VideoId;
pub use video::{PlaybackTarget, Video};
