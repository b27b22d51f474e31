//! Playlist creation and population.
//!
//! The creation response is not used to address the playlist afterwards.
//! Instead the playlist is looked up by its (date stamped) name among the
//! user's playlists, which only works for public playlists. That is why a
//! playlist is always created public and made private once it has been found
//! and filled.

use crate::{
    Error, Res,
    spotify::MusicService,
    types::{CreatePlaylistRequest, Track},
    utils,
};

/// Name of the playlist created on `date` (`MM/DD/YYYY`).
pub fn playlist_name(artist_name: &str, date: &str) -> String {
    format!("The name of this playlist is {artist_name}: {date}")
}

pub fn playlist_description(artist_name: &str, count: usize, date: &str) -> String {
    format!(
        "{count} random {artist_name} songs to get you through the day: {date}",
        count = utils::count_word(count)
    )
}

/// Creates a public, non-collaborative playlist and returns its name.
pub async fn create_playlist<S: MusicService>(
    service: &S,
    owner: &str,
    artist_name: &str,
    count: usize,
    date: &str,
) -> Res<String> {
    let name = playlist_name(artist_name, date);
    let request = CreatePlaylistRequest {
        name: name.clone(),
        description: playlist_description(artist_name, count, date),
        public: true,
        collaborative: false,
    };

    service.create_playlist(owner, &request).await?;
    Ok(name)
}

/// Looks up the id of the user's playlist called exactly `name`.
///
/// # Errors
///
/// [`Error::PlaylistNotFound`] when no playlist on the first page matches,
/// e.g. because the new playlist hasn't shown up in the listing yet.
pub async fn find_playlist_id_by_name<S: MusicService>(service: &S, name: &str) -> Res<String> {
    service
        .current_user_playlists()
        .await?
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .ok_or_else(|| Error::PlaylistNotFound(name.to_string()))
}

/// Adds all tracks in one batch.
pub async fn add_tracks<S: MusicService>(
    service: &S,
    playlist_id: &str,
    tracks: &[Track],
) -> Res<()> {
    let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
    service.add_tracks(playlist_id, &uris).await
}

pub async fn set_visibility<S: MusicService>(
    service: &S,
    playlist_id: &str,
    public: bool,
) -> Res<()> {
    service.change_visibility(playlist_id, public).await
}
