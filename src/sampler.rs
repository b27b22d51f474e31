//! Track collection and random sampling.

use std::collections::BTreeMap;

use rand::{Rng, seq::index};

use crate::{Error, Res, spotify::MusicService, types::Track};

/// Number of tracks a playlist gets unless told otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Track uri to track name.
pub type TrackMap = BTreeMap<String, String>;

/// Lists the tracks of every album and merges them into one map.
///
/// One request per album, in order. A uri seen twice keeps the name from the
/// later album. Songs are not de-duplicated by name.
pub async fn collect_tracks<S: MusicService>(service: &S, album_ids: &[String]) -> Res<TrackMap> {
    let mut tracks = TrackMap::new();
    for album_id in album_ids {
        for track in service.album_tracks(album_id).await? {
            tracks.insert(track.uri, track.name);
        }
    }
    Ok(tracks)
}

/// Draws `k` distinct tracks uniformly at random, in draw order.
///
/// # Errors
///
/// [`Error::InsufficientTracks`] when `tracks` holds fewer than `k` entries.
/// The sampler never hands back a shorter list.
pub fn sample_tracks<R: Rng + ?Sized>(
    tracks: &TrackMap,
    k: usize,
    rng: &mut R,
) -> Res<Vec<Track>> {
    if tracks.len() < k {
        return Err(Error::InsufficientTracks {
            wanted: k,
            available: tracks.len(),
        });
    }

    let entries: Vec<(&String, &String)> = tracks.iter().collect();
    let picked = index::sample(rng, entries.len(), k)
        .into_iter()
        .map(|i| {
            let (uri, name) = entries[i];
            Track {
                uri: uri.clone(),
                name: name.clone(),
            }
        })
        .collect();

    Ok(picked)
}
