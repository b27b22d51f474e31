//! # CLI Module
//!
//! User-facing commands. Each command loads the configuration, wires the
//! pieces it needs together and reports progress with the console macros.
//! Library errors end up here, where they are printed and turned into an exit
//! code.
//!
//! ## Commands
//!
//! - [`playlist`] - Full run: authenticate, build the playlist, store records
//! - [`auth`] - Authorize with Spotify and cache the token
//! - [`history`] - Show stored playlist records
//!
//! ## Usage
//!
//! ```bash
//! sporlmix                              # Ten random Talking Heads songs
//! sporlmix --artist "Tom Tom Club"      # Another artist
//! sporlmix --count 5 --keep-public      # Five songs, leave it public
//! sporlmix history --limit 20           # Last stored rows
//! ```

mod auth;
mod history;
mod playlist;

pub use auth::auth;
pub use history::history;
pub use playlist::playlist;

use std::path::Path;

use crate::{Stage, StageExt, config::Config, error};

/// Loads the configuration or exits; nothing can run without it.
fn load_config(path: Option<&Path>) -> Config {
    match Config::load(path).stage(Stage::LoadConfig) {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}
