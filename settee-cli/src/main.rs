use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use settee_core::{
    DiskStore, FavoritesStore, KeyValueStore,
    config::{Config, ConfigLoader, ConfigLoaderOptions},
    persistence::StoreRoot,
};
use settee_model::{FavoriteChange, PlaybackCheckpoint, Video, VideoId};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "settee",
    version,
    about = "Inspect and edit settee favorites and playback checkpoints"
)]
struct Cli {
    /// Path to settee.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to a .env file to load before reading the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    /// Override the on-disk store directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the favorites list
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Inspect stored playback positions
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Print every favorite as `<id>\t<title>\t<videoUrl>`
    List,
    /// Add a video (replaces an existing entry with the same id)
    Add(VideoArgs),
    /// Add the video if absent, remove it if present
    Toggle(VideoArgs),
    /// Remove a video by id
    Remove { id: String },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Print the stored position for a playback URL, or `none`
    Show { video_url: String },
}

#[derive(Args)]
struct VideoArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    video_url: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    thumbnail_url: Option<String>,
}

impl From<VideoArgs> for Video {
    fn from(args: VideoArgs) -> Self {
        let mut video = Video::new(args.id, args.title, args.video_url);
        if let Some(description) = args.description {
            video = video.with_description(description);
        }
        if let Some(url) = args.thumbnail_url {
            video = video.with_thumbnail_url(url);
        }
        video
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let store: Arc<dyn KeyValueStore> =
        Arc::new(DiskStore::new(StoreRoot::new(&config.storage.data_dir)));

    match cli.command {
        Command::Favorites { action } => run_favorites(action, store).await,
        Command::Progress { action } => run_progress(action, store).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
    });
    let load = loader.load().context("failed to load configuration")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => debug!(hint = %hint, "{}", warning.message),
            None => debug!("{}", warning.message),
        }
    }

    let mut config = load.config;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    config.storage.ensure_directories().with_context(|| {
        format!(
            "failed to create data directory {}",
            config.storage.data_dir.display()
        )
    })?;
    debug!(data_dir = %config.storage.data_dir.display(), "store ready");
    Ok(config)
}

async fn run_favorites(
    action: FavoritesAction,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    let favorites = FavoritesStore::open(store).await;
    match action {
        FavoritesAction::List => {
            for video in favorites.snapshot().await.iter() {
                println!("{}\t{}\t{}", video.id, video.title, video.video_url);
            }
        }
        FavoritesAction::Add(args) => {
            let change = favorites.add(args.into()).await?;
            println!("{}", describe(change));
        }
        FavoritesAction::Toggle(args) => {
            let outcome = favorites.toggle(args.into()).await?;
            println!("{}", describe(outcome.change));
        }
        FavoritesAction::Remove { id } => {
            let change = favorites.remove(&VideoId::from(id)).await?;
            println!("{}", describe(change));
        }
    }
    Ok(())
}

async fn run_progress(
    action: ProgressAction,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    match action {
        ProgressAction::Show { video_url } => {
            let key = PlaybackCheckpoint::storage_key_for(&video_url);
            let position = match store.get(&key).await? {
                Some(raw) => match PlaybackCheckpoint::decode(video_url, &raw) {
                    Ok(checkpoint) => Some(checkpoint.encode()),
                    Err(err) => {
                        warn!(key = %key, error = %err, "stored checkpoint is unreadable");
                        None
                    }
                },
                None => None,
            };
            println!("{}", position.as_deref().unwrap_or("none"));
        }
    }
    Ok(())
}

fn describe(change: FavoriteChange) -> &'static str {
    match change {
        FavoriteChange::Added => "added",
        FavoriteChange::Replaced => "replaced",
        FavoriteChange::Removed => "removed",
        FavoriteChange::Unchanged => "unchanged",
    }
}
