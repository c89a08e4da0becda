use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

const SUPPORTED_BITRATES: [u32; 3] = [96, 160, 320];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    spotify: SpotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    #[serde(default = "default_bitrate")]
    pub bitrate: u32,
    /// Patterns for playlist names that should be kept offline.
    #[serde(default)]
    pub offline_playlists: Vec<String>,
    /// JSON catalog dump backing the session.
    pub catalog: String,
}

fn default_bitrate() -> u32 {
    160
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify: SpotifyConfig {
                bitrate: default_bitrate(),
                offline_playlists: Vec::new(),
                catalog: "~/.local/share/spotify-playlists/catalog.json".to_string(),
            },
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if !SUPPORTED_BITRATES.contains(&config.spotify.bitrate) {
            return Err(eyre!(
                "Unsupported bitrate {}, expected one of {:?}",
                config.spotify.bitrate,
                SUPPORTED_BITRATES
            ));
        }
        Ok(config)
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("spotify-playlists").join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path().ok_or(eyre!("Config file not found"))?;

        Self::from_file(&config_path)
    }

    /// Write the default config unless a config file already exists. Returns its path.
    pub fn create_default() -> Result<PathBuf> {
        let config_path = Self::config_path().ok_or(eyre!("No config directory found"))?;
        if config_path.exists() {
            return Ok(config_path);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, contents)
            .wrap_err(format!("Failed to write config file: {}", config_path.display()))?;
        Ok(config_path)
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn spotify(&self) -> &SpotifyConfig {
        &self.spotify
    }

    /// Get expanded catalog path
    pub fn catalog_path(&self) -> PathBuf {
        self.expand_path(&self.spotify.catalog)
    }
}
