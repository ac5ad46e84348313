use once_cell::sync::Lazy;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use super::{
    models::{Config, ConfigMetadata, PlaybackConfig, StorageConfig},
    sources::{EnvConfig, FileConfig},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("settee.toml"),
        PathBuf::from("config/settee.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Fold `.env` into the process environment, then compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = load_env_file(self.options.env_file.as_deref())?;

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose from an explicit environment snapshot; no `.env` handling.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No settee.toml detected; using environment and defaults",
                "Pass --config or set SETTEE_CONFIG to use a file",
            );
        }

        let config = compose_config(file_config.unwrap_or_default(), env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env.config_path)
        {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

/// Load `path`, or the nearest `.env`, into the process environment.
///
/// Only a missing file counts as "not loaded"; any other I/O failure is an
/// error.
fn load_env_file(path: Option<&Path>) -> Result<bool, ConfigLoadError> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match loaded {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<Config, ConfigLoadError> {
    let mut storage = StorageConfig::default();
    if let Some(dir) = env.data_dir.or(file.storage.data_dir) {
        storage.data_dir = dir;
    }

    let mut playback = PlaybackConfig::default();
    if let Some(raw) = env
        .checkpoint_interval
        .or(file.playback.checkpoint_interval)
    {
        playback.checkpoint_interval = parse_interval(&raw)?;
    }

    if let Some(raw) = env.resume_completion_ratio {
        playback.resume_completion_ratio = raw.trim().parse().map_err(|_| {
            ConfigLoadError::InvalidValue {
                field: "resume_completion_ratio",
                reason: format!("not a number: {raw:?}"),
            }
        })?;
    } else if let Some(ratio) = file.playback.resume_completion_ratio {
        playback.resume_completion_ratio = ratio;
    }

    validate_playback(&playback)?;

    Ok(Config {
        storage,
        playback,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    })
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|err| {
        ConfigLoadError::InvalidValue {
            field: "checkpoint_interval",
            reason: format!("{raw:?}: {err}"),
        }
    })
}

fn validate_playback(playback: &PlaybackConfig) -> Result<(), ConfigLoadError> {
    if playback.checkpoint_interval.is_zero() {
        return Err(ConfigLoadError::InvalidValue {
            field: "checkpoint_interval",
            reason: "must be greater than zero".into(),
        });
    }
    let ratio = playback.resume_completion_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(ConfigLoadError::InvalidValue {
            field: "resume_completion_ratio",
            reason: format!("{ratio} is outside (0, 1]"),
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file {path} not found")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing_default = dir.path().join("nope.toml");
        let err = ConfigLoader::new()
            .with_config_path(&missing_default)
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn file_values_are_applied() {
        let file = write_config(
            r#"
            [storage]
            data_dir = "/tmp/settee-test"

            [playback]
            checkpoint_interval = "250ms"
            resume_completion_ratio = 0.9
            "#,
        );

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default())
            .unwrap();

        assert_eq!(load.config.storage.data_dir, PathBuf::from("/tmp/settee-test"));
        assert_eq!(
            load.config.playback.checkpoint_interval,
            Duration::from_millis(250)
        );
        assert_eq!(load.config.playback.resume_completion_ratio, 0.9);
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
            [playback]
            checkpoint_interval = "5s"
            "#,
        );
        let env = EnvConfig::from_lookup(|name| match name {
            "SETTEE_CHECKPOINT_INTERVAL" => Some("100ms".into()),
            "SETTEE_DATA_DIR" => Some("/var/lib/settee".into()),
            _ => None,
        });

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env)
            .unwrap();

        assert_eq!(
            load.config.playback.checkpoint_interval,
            Duration::from_millis(100)
        );
        assert_eq!(load.config.storage.data_dir, PathBuf::from("/var/lib/settee"));
    }

    #[test]
    fn rejects_zero_interval_and_bad_ratio() {
        let zero = write_config("[playback]\ncheckpoint_interval = \"0s\"\n");
        let err = ConfigLoader::new()
            .with_config_path(zero.path())
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue { field: "checkpoint_interval", .. }
        ));

        let ratio = write_config("[playback]\nresume_completion_ratio = 1.5\n");
        let err = ConfigLoader::new()
            .with_config_path(ratio.path())
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue { field: "resume_completion_ratio", .. }
        ));
    }

    #[test]
    fn missing_env_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_env_file(Some(&dir.path().join("absent.env"))).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn unreadable_env_file_is_an_error() {
        // A directory opens on Linux but fails to read.
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigLoadError::EnvFile(_)));
    }

    #[test]
    fn explicit_env_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"SETTEE_TEST_ENV_FILE_MARKER=1\n").unwrap();
        assert!(load_env_file(Some(file.path())).unwrap());
        assert_eq!(
            std::env::var("SETTEE_TEST_ENV_FILE_MARKER").as_deref(),
            Ok("1")
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = write_config("[playback\n");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }
}
