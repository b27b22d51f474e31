use crate::{
    Res,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ChangePlaylistDetailsRequest,
        CreatePlaylistRequest, CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist,
    },
};

/// Page size used when listing the current user's playlists.
const PLAYLIST_PAGE_LIMIT: &str = "50";

impl SpotifyClient {
    /// Creates a playlist owned by `owner`.
    pub async fn create(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let request = self
            .post(&format!("/users/{user_id}/playlists", user_id = owner))
            .json(request);

        Self::send_json::<CreatePlaylistResponse>(request).await
    }

    /// First page of the current user's playlists, newest first.
    pub async fn list_own(&self) -> Res<Vec<Playlist>> {
        let request = self
            .get("/me/playlists")
            .query(&[("limit", PLAYLIST_PAGE_LIMIT)]);

        let json = Self::send_json::<GetUserPlaylistsResponse>(request).await?;
        Ok(json.items)
    }

    /// Appends tracks to a playlist in one request.
    ///
    /// Spotify accepts at most 100 uris per call.
    pub async fn add_uris(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self
            .post(&format!("/playlists/{id}/tracks", id = playlist_id))
            .json(&body);

        Self::send_json::<AddTrackToPlaylistResponse>(request).await?;
        Ok(())
    }

    pub async fn set_public(&self, playlist_id: &str, public: bool) -> Res<()> {
        let request = self
            .put(&format!("/playlists/{id}", id = playlist_id))
            .json(&ChangePlaylistDetailsRequest { public });

        Self::send_empty(request).await
    }
}
