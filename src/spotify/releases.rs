use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Album, AlbumResponse, Track, Tracks},
};

/// Release group requested from `/artists/{id}/albums`. Singles, compilations
/// and appearances are left out.
pub const STUDIO_ALBUMS: &str = "album";

impl SpotifyClient {
    /// Retrieves the studio albums of an artist.
    ///
    /// Uses `/artists/{id}/albums` with `include_groups=album` and no `limit`,
    /// so the API's default page size applies. Only the first page is read.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify ID of the artist
    ///
    /// # Example
    ///
    /// ```
    /// let albums = client.get_albums_for_artist("2x9SpqnPi8rlE9pjHBwmSC").await?;
    /// println!("Found {} albums", albums.len());
    /// ```
    pub async fn get_albums_for_artist(&self, artist_id: &str) -> Res<Vec<Album>> {
        let request = self
            .get(&format!("/artists/{id}/albums", id = artist_id))
            .query(&[("include_groups", STUDIO_ALBUMS)]);

        let json = Self::send_json::<AlbumResponse>(request).await?;
        Ok(json.items)
    }

    /// Retrieves the track listing of one album.
    pub async fn get_album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        let request = self.get(&format!("/albums/{id}/tracks", id = album_id));
        let json = Self::send_json::<Tracks>(request).await?;
        Ok(json.items)
    }
}
