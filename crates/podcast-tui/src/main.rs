mod action;
mod app;
mod app_state;
mod component;
mod components;
mod mpv;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use podcast_core::api::CatalogClient;
use podcast_core::config::Config;
use podcast_core::favourites::FavouritesStore;
use podcast_core::navigation::Route;
use podcast_core::storage::{JsonFileStorage, Storage};

/// Browse, favourite and play podcasts from the terminal.
#[derive(Debug, Parser)]
#[command(name = "podcasts", version)]
struct Args {
    /// Catalog API base URL (overrides config.toml).
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for favourites, theme and logs (overrides config.toml).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start without spawning mpv.
    #[arg(long)]
    no_audio: bool,

    /// Page to open at startup, e.g. `/show/10716` or `/favourites`.
    #[arg(long, default_value = "/")]
    open: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(url) = args.base_url {
        config.api.base_url = url;
    }
    if let Some(dir) = args.data_dir {
        config.paths.data_dir = dir;
    }

    let data_dir = config.paths.data_dir.clone();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("podcasts.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; suppress connection-level DEBUG from the HTTP client.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("podcasts log: {}", log_path.display());
    tracing::info!("podcasts starting, api={}", config.api.base_url);

    let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(&data_dir));
    let favourites = FavouritesStore::load(storage.clone());
    let client = CatalogClient::new(&config.api)?;

    let route = Route::parse(&args.open);
    let app = app::App::new(config, client, storage, favourites, route, !args.no_audio);
    app.run().await?;

    Ok(())
}
