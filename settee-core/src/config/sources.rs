use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub playback: FilePlaybackConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilePlaybackConfig {
    /// Humantime duration, e.g. `"250ms"` or `"1s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_completion_ratio: Option<f64>,
}

/// Overrides gathered from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub checkpoint_interval: Option<String>,
    pub resume_completion_ratio: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        Self {
            config_path: non_empty("SETTEE_CONFIG").map(PathBuf::from),
            data_dir: non_empty("SETTEE_DATA_DIR").map(PathBuf::from),
            checkpoint_interval: non_empty("SETTEE_CHECKPOINT_INTERVAL"),
            resume_completion_ratio: non_empty(
                "SETTEE_RESUME_COMPLETION_RATIO",
            ),
        }
    }
}
