//! Spotify Random Playlist CLI Library
//!
//! This library builds a playlist of randomly sampled tracks from one artist's
//! studio albums and keeps a local record of every playlist it created. A run
//! is a straight pipeline: authenticate, discover the catalog, drop reissues,
//! sample tracks, publish the playlist and store the result in SQLite.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `catalog` - Artist lookup, album listing and reissue filtering
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration file loading
//! - `error` - Error type shared by every stage
//! - `etl` - Run context and the pipeline driver
//! - `management` - Token caching and refresh
//! - `publisher` - Playlist creation and population
//! - `sampler` - Track collection and random sampling
//! - `server` - Local HTTP server for OAuth callbacks
//! - `sink` - Playlist records and the SQLite store
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod management;
pub mod publisher;
pub mod sampler;
pub mod server;
pub mod sink;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Stage, StageExt};

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Found {} albums", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary's top level. Library code returns [`Error`]
/// instead so that callers decide whether a failure is fatal.
///
/// # Behavior
///
/// The process exits with code 1 right after printing.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues like an already stored playlist or a browser
/// that couldn't be opened.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
