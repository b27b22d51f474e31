//! # Spotify Integration Module
//!
//! This module is the only place that talks HTTP to Spotify. Everything above
//! it (catalog discovery, sampling, publishing) is written against the
//! [`MusicService`] trait, so a run can be exercised against an in-memory
//! service in tests.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (etl, catalog, sampler, publisher)
//!          ↓
//! MusicService trait
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization code flow with a local callback server
//! - [`artists`] - Artist search
//! - [`releases`] - Album listing and album track listing
//! - [`playlist`] - Playlist creation, listing, population and visibility
//!
//! ## API Coverage
//!
//! - `GET /search` - Artist search
//! - `GET /artists/{id}/albums` - Studio albums of an artist
//! - `GET /albums/{id}/tracks` - Track listing of an album
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `GET /me/playlists` - Playlists of the current user
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks
//! - `PUT /playlists/{playlist_id}` - Change playlist details
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! Non-success statuses are turned into errors with `error_for_status` and
//! propagated. Nothing is retried; a failed call ends the run.
//!
//! ## Known Limitations
//!
//! Album listing and playlist listing read a single page. Artists with more
//! studio albums than the default page size are truncated.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod releases;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    Res,
    types::{Album, Artist, CreatePlaylistRequest, CreatePlaylistResponse, Playlist, Track},
};

/// Remote operations a playlist run depends on.
#[allow(async_fn_in_trait)]
pub trait MusicService {
    /// Artists matching `name`, best match first.
    async fn search_artists(&self, name: &str) -> Res<Vec<Artist>>;

    /// Studio albums of an artist. One page only.
    async fn artist_albums(&self, artist_id: &str) -> Res<Vec<Album>>;

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>>;

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse>;

    async fn current_user_playlists(&self) -> Res<Vec<Playlist>>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()>;

    async fn change_visibility(&self, playlist_id: &str, public: bool) -> Res<()>;
}

/// Authenticated Spotify Web API client.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(&self.access_token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(&self.access_token)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path)).bearer_auth(&self.access_token)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Res<T> {
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(request: RequestBuilder) -> Res<()> {
        request.send().await?.error_for_status()?;
        Ok(())
    }
}

impl MusicService for SpotifyClient {
    async fn search_artists(&self, name: &str) -> Res<Vec<Artist>> {
        self.search_artist(name).await
    }

    async fn artist_albums(&self, artist_id: &str) -> Res<Vec<Album>> {
        self.get_albums_for_artist(artist_id).await
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        self.get_album_tracks(album_id).await
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        self.create(owner, request).await
    }

    async fn current_user_playlists(&self) -> Res<Vec<Playlist>> {
        self.list_own().await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.add_uris(playlist_id, uris).await
    }

    async fn change_visibility(&self, playlist_id: &str, public: bool) -> Res<()> {
        self.set_public(playlist_id, public).await
    }
}
