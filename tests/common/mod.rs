#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use sporlmix::{
    Res,
    spotify::MusicService,
    types::{Album, Artist, CreatePlaylistRequest, CreatePlaylistResponse, Playlist, Track},
};

#[derive(Debug, Default)]
pub struct Calls {
    pub album_track_requests: Vec<String>,
    pub playlists: Vec<Playlist>,
    pub owners: Vec<String>,
    pub added: HashMap<String, Vec<String>>,
    pub visibility_changes: Vec<(String, bool)>,
}

/// In-memory stand-in for the Spotify Web API.
#[derive(Debug, Default)]
pub struct FakeService {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: HashMap<String, Vec<Track>>,
    /// Newly created playlists don't show up in the listing.
    pub lagging_listing: bool,
    pub calls: Mutex<Calls>,
}

impl FakeService {
    pub fn with_artist(id: &str, name: &str) -> Self {
        Self {
            artists: vec![Artist {
                id: id.to_string(),
                name: name.to_string(),
            }],
            ..Default::default()
        }
    }

    /// Adds an album with `n` tracks named `<prefix> 1..n`.
    pub fn album(mut self, id: &str, name: &str, n: usize) -> Self {
        self.albums.push(album(id, name));
        let tracks = (1..=n)
            .map(|i| Track {
                uri: format!("spotify:track:{id}-{i}"),
                name: format!("{name} {i}"),
            })
            .collect();
        self.tracks.insert(id.to_string(), tracks);
        self
    }
}

pub fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
    }
}

impl MusicService for FakeService {
    async fn search_artists(&self, _name: &str) -> Res<Vec<Artist>> {
        Ok(self.artists.clone())
    }

    async fn artist_albums(&self, _artist_id: &str) -> Res<Vec<Album>> {
        Ok(self.albums.clone())
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        let mut calls = self.calls.lock().unwrap();
        calls.album_track_requests.push(album_id.to_string());
        Ok(self.tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let mut calls = self.calls.lock().unwrap();
        let id = format!("playlist-{}", calls.playlists.len() + 1);
        calls.owners.push(owner.to_string());
        calls.playlists.push(Playlist {
            id: id.clone(),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            public: Some(request.public),
        });
        Ok(CreatePlaylistResponse {
            id,
            name: request.name.clone(),
        })
    }

    async fn current_user_playlists(&self) -> Res<Vec<Playlist>> {
        let mut listing = vec![Playlist {
            id: "older".to_string(),
            name: "Road trip".to_string(),
            description: None,
            public: Some(true),
        }];
        if !self.lagging_listing {
            listing.extend(self.calls.lock().unwrap().playlists.iter().cloned());
        }
        Ok(listing)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let mut calls = self.calls.lock().unwrap();
        calls
            .added
            .entry(playlist_id.to_string())
            .or_default()
            .extend(uris.iter().cloned());
        Ok(())
    }

    async fn change_visibility(&self, playlist_id: &str, public: bool) -> Res<()> {
        let mut calls = self.calls.lock().unwrap();
        calls
            .visibility_changes
            .push((playlist_id.to_string(), public));
        Ok(())
    }
}
