//! Configuration loading.
//!
//! Precedence is environment over TOML file over built-in defaults. A
//! `.env` file, when present, is folded into the environment first.

pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions,
    ConfigWarning, ConfigWarnings,
};
pub use models::{Config, PlaybackConfig, StorageConfig};
pub use sources::{EnvConfig, FileConfig};
