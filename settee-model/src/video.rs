use crate::ids::VideoId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Catalog video record.
///
/// Owned by the catalog; favorites keep a snapshot of it and sessions only
/// read the playback locator.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Video {
    pub id: VideoId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub video_url: String,
}

impl Video {
    pub fn new(
        id: impl Into<VideoId>,
        title: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            video_url: video_url.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }
}

/// What a playback session is opened for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTarget {
    pub video_id: VideoId,
    pub video_url: String,
    /// Known duration, when the catalog or the source reported one.
    pub duration_seconds: Option<f64>,
}

impl PlaybackTarget {
    pub fn new(video_id: impl Into<VideoId>, video_url: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            video_url: video_url.into(),
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds =
            (seconds.is_finite() && seconds > 0.0).then_some(seconds);
        self
    }
}

impl From<&Video> for PlaybackTarget {
    fn from(video: &Video) -> Self {
        Self::new(video.id.clone(), video.video_url.clone())
    }
}
