//! # API Module
//!
//! HTTP endpoints of the short-lived server that runs while a user authorizes
//! the app in the browser.
//!
//! - [`callback`] - Receives the authorization code from Spotify, checks the
//!   `state` value and exchanges the code for a token.
//! - [`health`] - Reports status and version.
//!
//! Both are plain async handlers mounted by [`crate::server::start_api_server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
