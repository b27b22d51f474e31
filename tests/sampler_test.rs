mod common;

use std::collections::HashSet;

use common::FakeService;
use rand::{SeedableRng, rngs::StdRng};
use sporlmix::{
    Error,
    sampler::{TrackMap, collect_tracks, sample_tracks},
    types::Track,
};

fn track_map(n: usize) -> TrackMap {
    (0..n)
        .map(|i| (format!("spotify:track:{i}"), format!("Song {i}")))
        .collect()
}

#[test]
fn test_sample_returns_distinct_known_tracks() {
    let tracks = track_map(25);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sampled = sample_tracks(&tracks, 10, &mut rng).unwrap();

        assert_eq!(sampled.len(), 10);
        let uris: HashSet<&str> = sampled.iter().map(|t| t.uri.as_str()).collect();
        assert_eq!(uris.len(), 10);
        for t in &sampled {
            assert_eq!(tracks.get(&t.uri), Some(&t.name));
        }
    }
}

#[test]
fn test_sample_exactly_available_count() {
    let tracks = track_map(10);
    let mut rng = StdRng::seed_from_u64(3);

    let sampled = sample_tracks(&tracks, 10, &mut rng).unwrap();
    let uris: HashSet<String> = sampled.into_iter().map(|t| t.uri).collect();
    let all: HashSet<String> = tracks.keys().cloned().collect();
    assert_eq!(uris, all);
}

#[test]
fn test_sample_fails_on_small_catalog() {
    let tracks = track_map(7);
    let mut rng = StdRng::seed_from_u64(1);

    let err = sample_tracks(&tracks, 10, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientTracks {
            wanted: 10,
            available: 7
        }
    ));
}

#[test]
fn test_sample_is_reproducible_with_seed() {
    let tracks = track_map(40);

    let a = sample_tracks(&tracks, 10, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = sample_tracks(&tracks, 10, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_collect_tracks_one_call_per_album() {
    let service = FakeService::with_artist("th", "Talking Heads")
        .album("fom", "Fear of Music", 12)
        .album("ril", "Remain in Light", 8);

    let ids = vec!["fom".to_string(), "ril".to_string()];
    let tracks = collect_tracks(&service, &ids).await.unwrap();

    assert_eq!(tracks.len(), 20);
    assert_eq!(
        service.calls.lock().unwrap().album_track_requests,
        vec!["fom".to_string(), "ril".to_string()]
    );
}

#[tokio::test]
async fn test_collect_tracks_later_album_wins_on_same_uri() {
    let mut service = FakeService::default();
    service.tracks.insert(
        "first".to_string(),
        vec![Track {
            uri: "spotify:track:shared".to_string(),
            name: "Psycho Killer".to_string(),
        }],
    );
    service.tracks.insert(
        "second".to_string(),
        vec![
            Track {
                uri: "spotify:track:shared".to_string(),
                name: "Psycho Killer (Live)".to_string(),
            },
            Track {
                uri: "spotify:track:other".to_string(),
                name: "Psycho Killer".to_string(),
            },
        ],
    );

    let ids = vec!["first".to_string(), "second".to_string()];
    let tracks = collect_tracks(&service, &ids).await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks["spotify:track:shared"], "Psycho Killer (Live)");
    assert_eq!(tracks["spotify:track:other"], "Psycho Killer");
}
