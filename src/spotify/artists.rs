use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, SearchArtistsResponse},
};

impl SpotifyClient {
    /// Searches artists by name.
    ///
    /// Sends `q=artist: <name>` restricted to `type=artist`, the same query a
    /// user would type into the Spotify search box with a field filter. The
    /// API ranks results itself, so the first item is the best match.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Artist>)` - Matching artists, possibly empty
    /// - `Err(Error::Http)` - Network error or non-success status
    pub async fn search_artist(&self, name: &str) -> Res<Vec<Artist>> {
        let query = format!("artist: {}", name);
        let request = self
            .get("/search")
            .query(&[("q", query.as_str()), ("type", "artist")]);

        let res = Self::send_json::<SearchArtistsResponse>(request).await?;
        Ok(res.artists.items)
    }
}
