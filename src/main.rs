mod config;
mod logging;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;
mod timing;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};
use serde::Serialize;

use crate::{
    config::Config,
    logging::init_tracing,
    services::spotify::{
        events::catalog_channel, playlists::SpotifyPlaylistsProvider, snapshot::SnapshotSession,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SPOTIFY_PLAYLISTS_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `spotify_playlists=debug`
    #[arg(long, default_value = "warn", global = true, env = "LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the flattened playlists and apply the offline policy
    List,
    /// Look up a playlist with its track references
    Lookup {
        /// The playlist URI
        uri: String,
    },
    /// Look up a playlist with full track details
    Items {
        /// The playlist URI
        uri: String,
    },
    /// Create a new playlist
    Create {
        /// Name of the new playlist
        name: String,
    },
    /// Delete a playlist (not supported by the service)
    Delete {
        /// The playlist URI
        uri: String,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    if let Commands::Config(config_commands) = &args.command {
        match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                tracing::info!("Default config available at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        }
        return Ok(());
    }

    tracing::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load spotify-playlists config")?;

    let (listener, mut changes) = catalog_channel();
    let session = Arc::new(SnapshotSession::from_file(&config.catalog_path(), listener)?);
    let provider = SpotifyPlaylistsProvider::new(
        session,
        config.spotify().offline_playlists.as_slice(),
        config.spotify().bitrate,
    )?;

    if changes.take_change() {
        tracing::debug!(
            "Playlist catalog changed (generation {})",
            changes.generation()
        );
    }

    match args.command {
        Commands::List => {
            provider.refresh();
            print_json(&provider.as_list())?
        }
        Commands::Lookup { uri } => match provider.lookup(&uri).await {
            Some(playlist) => print_json(&playlist)?,
            None => println!("Playlist not found: {}", uri),
        },
        Commands::Items { uri } => match provider.get_items(&uri).await {
            Some(playlist) => print_json(&playlist)?,
            None => println!("Playlist not found: {}", uri),
        },
        Commands::Create { name } => {
            let created = provider.create(&name).await;
            if changes.take_change() {
                tracing::info!("Playlist catalog changed, re-listing");
                tracing::info!("{} playlists in catalog", provider.as_list().len());
            }
            match created {
                Some(playlist) => print_json(&playlist)?,
                None => println!("Playlist not created: {}", name),
            }
        }
        Commands::Delete { uri } => {
            provider.delete(&uri);
            println!("Deleting playlists is not supported: {}", uri);
        }
        Commands::Config(_) => {}
    }

    Ok(())
}
