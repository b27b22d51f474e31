//! Catalog discovery: artist lookup, studio album listing and reissue filtering.
//!
//! Reissue detection is deliberately literal. An album is a reissue when its
//! name ends in a known annotation and the name with a fixed number of
//! trailing characters removed is the name of another album in the same
//! listing. The offsets below are the exact lengths of those annotations
//! including the separating space; changing them changes which albums survive.

use std::collections::HashSet;

use crate::{Error, Res, spotify::MusicService, types::Album};

/// Trailing text of a deluxe edition name, e.g. `Fear of Music (Deluxe Version)`.
pub const DELUXE_MARKER: &str = "Deluxe Version)";
/// Length of ` (Deluxe Version)`.
pub const DELUXE_SUFFIX_LEN: usize = 17;
/// Trailing text of a remastered edition name.
pub const REMASTER_MARKER: &str = "Remaster)";
/// Length of ` (YYYY Remaster)`.
pub const REMASTER_SUFFIX_LEN: usize = 16;
/// Length of ` (Expanded YYYY Remaster)`.
pub const EXPANDED_REMASTER_SUFFIX_LEN: usize = 25;

/// Resolves an artist name to the id of the best search match.
///
/// # Errors
///
/// [`Error::ArtistNotFound`] when the search returns no artists.
pub async fn resolve_artist<S: MusicService>(service: &S, name: &str) -> Res<String> {
    let artists = service.search_artists(name).await?;
    artists
        .into_iter()
        .next()
        .map(|a| a.id)
        .ok_or_else(|| Error::ArtistNotFound(name.to_string()))
}

/// Lists the studio albums of an artist (first page only).
pub async fn list_albums<S: MusicService>(service: &S, artist_id: &str) -> Res<Vec<Album>> {
    service.artist_albums(artist_id).await
}

/// Returns the ids of all albums that are not reissues of another album in
/// `albums`, in listing order and without duplicates.
pub fn filter_reissues(albums: &[Album]) -> Vec<String> {
    let names: HashSet<&str> = albums.iter().map(|a| a.name.as_str()).collect();
    let reissues: HashSet<&str> = albums
        .iter()
        .filter(|a| is_reissue(&a.name, &names))
        .map(|a| a.id.as_str())
        .collect();

    let mut seen = HashSet::new();
    albums
        .iter()
        .map(|a| a.id.as_str())
        .filter(|id| !reissues.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

fn is_reissue(name: &str, names: &HashSet<&str>) -> bool {
    let base_exists = |suffix_len: usize| names.contains(drop_last_chars(name, suffix_len));

    if name.ends_with(DELUXE_MARKER) && base_exists(DELUXE_SUFFIX_LEN) {
        return true;
    }

    name.ends_with(REMASTER_MARKER)
        && (base_exists(REMASTER_SUFFIX_LEN) || base_exists(EXPANDED_REMASTER_SUFFIX_LEN))
}

/// `name` without its last `n` characters; empty when it is not longer than `n`.
fn drop_last_chars(name: &str, n: usize) -> &str {
    if n == 0 {
        return name;
    }
    match name.char_indices().rev().nth(n - 1) {
        Some((i, _)) => &name[..i],
        None => "",
    }
}
