//! Persisted playback position and the storage key families.

use crate::error::{ModelError, Result};

/// Storage key holding the whole favorites set.
pub const FAVORITES_KEY: &str = "favorites";

/// Prefix of the per-video progress keys; the playback locator follows it.
pub const PROGRESS_KEY_PREFIX: &str = "videoProgress_";

/// Last known playback position of one video.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackCheckpoint {
    pub video_url: String,
    pub position_seconds: f64,
}

impl PlaybackCheckpoint {
    pub fn new(video_url: impl Into<String>, position_seconds: f64) -> Self {
        Self {
            video_url: video_url.into(),
            position_seconds,
        }
    }

    pub fn storage_key_for(video_url: &str) -> String {
        let mut key =
            String::with_capacity(PROGRESS_KEY_PREFIX.len() + video_url.len());
        key.push_str(PROGRESS_KEY_PREFIX);
        key.push_str(video_url);
        key
    }

    pub fn storage_key(&self) -> String {
        Self::storage_key_for(&self.video_url)
    }

    /// Stored text: the shortest decimal rendering (`120`, `42.5`).
    pub fn encode(&self) -> String {
        self.position_seconds.to_string()
    }

    /// Parse a stored position. Only finite, non-negative numbers are valid.
    pub fn parse_position(raw: &str) -> Result<f64> {
        let trimmed = raw.trim();
        let value: f64 = trimmed.parse().map_err(|_| {
            ModelError::InvalidCheckpoint(format!("not a number: {trimmed:?}"))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::InvalidCheckpoint(format!(
                "out of range: {value}"
            )));
        }
        Ok(value)
    }

    pub fn decode(video_url: impl Into<String>, raw: &str) -> Result<Self> {
        Ok(Self::new(video_url, Self::parse_position(raw)?))
    }

    /// A checkpoint worth offering as a resume point.
    ///
    /// Zero means no progress. With a known duration, positions at or past
    /// `duration * completion_ratio` count as finished.
    pub fn is_resumable(
        &self,
        duration_seconds: Option<f64>,
        completion_ratio: f64,
    ) -> bool {
        if self.position_seconds <= 0.0 {
            return false;
        }
        match duration_seconds {
            Some(duration) if duration > 0.0 => {
                self.position_seconds < duration * completion_ratio
            }
            _ => true,
        }
    }
}
