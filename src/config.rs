//! Configuration management for the playlist runner.
//!
//! Settings live in a `.env` style file in the platform-specific local data
//! directory under `sporlmix/.env`:
//! - Linux: `~/.local/share/sporlmix/.env`
//! - macOS: `~/Library/Application Support/sporlmix/.env`
//! - Windows: `%LOCALAPPDATA%/sporlmix/.env`
//!
//! The file is parsed into a [`Config`] once per run. Nothing is written to the
//! process environment, so the loaded values are the only source of truth for
//! the rest of the run.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Error, Res};

pub const KEY_USERNAME: &str = "SPOTIFY_USER_ID";
pub const KEY_PLAYLIST_OWNER: &str = "SPOTIFY_PLAYLIST_OWNER";
pub const KEY_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const KEY_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const KEY_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const KEY_DATABASE_LOCATION: &str = "DATABASE_LOCATION";
pub const KEY_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const KEY_API_URL: &str = "SPOTIFY_API_URL";
pub const KEY_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const KEY_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SQLITE_URL_PREFIX: &str = "sqlite:///";

/// Scope requested during authorization.
pub const PLAYLIST_SCOPE: &str = "playlist-modify-private playlist-modify-public";

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Account the access token is requested for.
    pub username: String,
    /// Account that owns created playlists. Defaults to `username`.
    pub playlist_owner: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Path of the SQLite database file.
    pub database_location: PathBuf,
    pub server_address: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl Config {
    /// Loads the configuration from `path`, or from the default location
    /// when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Res<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::from_path(&default_path()),
        }
    }

    /// Parses the dotenv file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing, can't be parsed, or
    /// lacks one of the required keys.
    #[allow(deprecated)]
    pub fn from_path(path: &Path) -> Res<Self> {
        let iter = dotenv::from_path_iter(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item
                .map_err(|e| Error::Config(format!("malformed {}: {}", path.display(), e)))?;
            values.insert(key, value);
        }

        Self::from_map(&values)
    }

    /// Builds a config from already parsed key/value pairs.
    pub fn from_map(values: &HashMap<String, String>) -> Res<Self> {
        let required = |key: &str| -> Res<String> {
            values
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("missing required key {}", key)))
        };
        let optional = |key: &str, default: &str| -> String {
            values
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let username = required(KEY_USERNAME)?;
        let client_id = required(KEY_CLIENT_ID)?;
        let client_secret = required(KEY_CLIENT_SECRET)?;
        let redirect_uri = required(KEY_REDIRECT_URI)?;
        let database_location = database_path(&required(KEY_DATABASE_LOCATION)?);
        let playlist_owner = optional(KEY_PLAYLIST_OWNER, &username);

        Ok(Self {
            username,
            playlist_owner,
            client_id,
            client_secret,
            redirect_uri,
            database_location,
            server_address: optional(KEY_SERVER_ADDRESS, DEFAULT_SERVER_ADDRESS),
            api_url: optional(KEY_API_URL, DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: optional(KEY_AUTH_URL, DEFAULT_AUTH_URL),
            token_url: optional(KEY_TOKEN_URL, DEFAULT_TOKEN_URL),
        })
    }
}

/// Default location of the configuration file.
pub fn default_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlmix/.env");
    path
}

// Accepts both a plain path and an SQLAlchemy style `sqlite:///path` URL.
fn database_path(location: &str) -> PathBuf {
    PathBuf::from(location.strip_prefix(SQLITE_URL_PREFIX).unwrap_or(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_strips_sqlite_url() {
        assert_eq!(
            database_path("sqlite:///my_playlists.sqlite"),
            PathBuf::from("my_playlists.sqlite")
        );
        assert_eq!(database_path("/tmp/x.db"), PathBuf::from("/tmp/x.db"));
    }
}
