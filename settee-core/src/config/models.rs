use std::{path::PathBuf, time::Duration};

/// Interval between checkpoint writes while a session is playing.
pub const DEFAULT_CHECKPOINT_INTERVAL: Duration = Duration::from_millis(100);

/// Fraction of a known duration past which a checkpoint counts as finished.
pub const DEFAULT_RESUME_COMPLETION_RATIO: f64 = 0.95;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub storage: StorageConfig,
    pub playback: PlaybackConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn ensure_directories(&self) -> crate::error::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub checkpoint_interval: Duration,
    pub resume_completion_ratio: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            resume_completion_ratio: DEFAULT_RESUME_COMPLETION_RATIO,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "settee", "settee")
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(".settee"))
}
