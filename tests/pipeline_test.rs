mod common;

use std::{collections::HashSet, path::PathBuf};

use chrono::Local;
use common::FakeService;
use rand::{SeedableRng, rngs::StdRng};
use sporlmix::{
    Error, Stage,
    config::Config,
    etl::{self, RunContext, RunSettings, RunState},
    sink::{PersistOutcome, RecordStore},
    types::Token,
    utils,
};
use tempfile::TempDir;

fn test_config(database_location: PathBuf) -> Config {
    Config {
        username: "davidbyrne".to_string(),
        playlist_owner: "davidbyrne-words".to_string(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        database_location,
        server_address: "127.0.0.1:8888".to_string(),
        api_url: "http://localhost/v1".to_string(),
        auth_url: "http://localhost/authorize".to_string(),
        token_url: "http://localhost/api/token".to_string(),
    }
}

fn talking_heads() -> FakeService {
    FakeService::with_artist("th", "Talking Heads")
        .album("fom", "Fear of Music", 12)
        .album("fomd", "Fear of Music (Deluxe Version)", 16)
        .album("ril", "Remain in Light", 13)
}

fn setup(
    service: FakeService,
    settings: RunSettings,
) -> (TempDir, RecordStore, RunContext<FakeService>) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("playlists.sqlite");
    let store = RecordStore::open(&db).unwrap();
    let ctx = RunContext::authenticated(test_config(db), service, settings, Local::now());
    (dir, store, ctx)
}

#[tokio::test]
async fn test_full_run_creates_private_playlist_and_records() {
    let (_dir, mut store, mut ctx) = setup(talking_heads(), RunSettings::default());
    let mut rng = StdRng::seed_from_u64(1977);

    let report = etl::run(&mut ctx, &mut store, &mut rng).await.unwrap();

    let date = utils::run_date(&ctx.started_at);
    let creation_id = utils::creation_id(&ctx.started_at);

    assert_eq!(report.final_state, RunState::VisibilitySet);
    assert_eq!(report.outcome, Some(PersistOutcome::Inserted(10)));
    assert!(report.playlist_name.contains(&date));
    assert_eq!(report.records.len(), 10);
    for r in &report.records {
        assert_eq!(r.creation_id, creation_id);
        assert_eq!(r.date, date);
        assert_eq!(r.artist_name, "Talking Heads");
        assert_eq!(r.playlist_id, report.playlist_id);
        assert!(
            r.song_uri.contains(":fom-") || r.song_uri.contains(":ril-"),
            "{} comes from a reissue",
            r.song_uri
        );
    }

    let calls = ctx.service.calls.lock().unwrap();
    assert_eq!(calls.playlists.len(), 1);
    assert_eq!(calls.playlists[0].public, Some(true));
    assert_eq!(calls.owners, vec!["davidbyrne-words".to_string()]);
    assert!(!calls.album_track_requests.contains(&"fomd".to_string()));
    assert_eq!(
        calls.visibility_changes,
        vec![(report.playlist_id.clone(), false)]
    );

    // every added track is recorded exactly once
    let added = &calls.added[&report.playlist_id];
    assert_eq!(added.len(), 10);
    assert_eq!(added.iter().collect::<HashSet<_>>().len(), 10);
    let recorded: Vec<String> = report.records.iter().map(|r| r.song_uri.clone()).collect();
    assert_eq!(added, &recorded);

    let stored = store.history(100).unwrap();
    assert_eq!(stored.len(), 10);
    assert!(stored.iter().all(|r| r.creation_id == creation_id && r.date == date));
}

#[tokio::test]
async fn test_keep_public_stops_after_adding_tracks() {
    let settings = RunSettings {
        make_private: false,
        sample_size: 5,
        ..RunSettings::default()
    };
    let (_dir, mut store, mut ctx) = setup(talking_heads(), settings);

    let report = etl::run(&mut ctx, &mut store, &mut StdRng::seed_from_u64(5))
        .await
        .unwrap();

    assert_eq!(report.final_state, RunState::TracksAdded);
    assert_eq!(report.records.len(), 5);
    assert!(ctx.service.calls.lock().unwrap().visibility_changes.is_empty());
    assert_eq!(store.count().unwrap(), 5);
}

#[tokio::test]
async fn test_unknown_artist_stops_before_albums() {
    let (_dir, mut store, mut ctx) = setup(FakeService::default(), RunSettings::default());

    let err = etl::run(&mut ctx, &mut store, &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::ResolveArtist));
    assert!(matches!(err.root(), Error::ArtistNotFound(_)));
    assert_eq!(ctx.state(), RunState::Authenticated);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_small_catalog_fails_before_playlist_creation() {
    let service = FakeService::with_artist("tt", "Tom Tom Club").album("ttc", "Tom Tom Club", 8);
    let (_dir, mut store, mut ctx) = setup(service, RunSettings::default());

    let err = etl::run(&mut ctx, &mut store, &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::SampleTracks));
    assert!(matches!(
        err.root(),
        Error::InsufficientTracks {
            wanted: 10,
            available: 8
        }
    ));
    assert_eq!(ctx.state(), RunState::AlbumsListed);
    assert!(ctx.service.calls.lock().unwrap().playlists.is_empty());
}

#[tokio::test]
async fn test_playlist_missing_from_listing_fails_lookup() {
    let mut service = talking_heads();
    service.lagging_listing = true;
    let (_dir, mut store, mut ctx) = setup(service, RunSettings::default());

    let err = etl::run(&mut ctx, &mut store, &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::FindPlaylist));
    assert!(matches!(err.root(), Error::PlaylistNotFound(_)));
    assert_eq!(ctx.state(), RunState::PlaylistCreated);
    assert!(ctx.service.calls.lock().unwrap().added.is_empty());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_run_state_only_moves_forward() {
    let mut ctx = RunContext::authenticated(
        test_config(PathBuf::from("unused.sqlite")),
        FakeService::default(),
        RunSettings::default(),
        Local::now(),
    );

    assert!(matches!(
        ctx.advance(RunState::TracksSampled),
        Err(Error::InvalidTransition {
            from: RunState::Authenticated,
            to: RunState::TracksSampled
        })
    ));
    assert!(ctx.advance(RunState::AlbumsListed).is_ok());
    assert!(ctx.advance(RunState::Authenticated).is_err());
    assert_eq!(ctx.state(), RunState::AlbumsListed);

    let mut state = RunState::Unauthenticated;
    while let Some(next) = state.next() {
        assert!(next > state);
        state = next;
    }
    assert_eq!(state, RunState::VisibilitySet);
}

#[test]
fn test_missing_token_fails_at_authentication() {
    let err = etl::require_token(None, "davidbyrne").unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Authenticate));
    assert!(matches!(err.root(), Error::Auth(msg) if msg == "Can't get token for davidbyrne"));

    let token = Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: 0,
    };
    let kept = etl::require_token(Some(token), "davidbyrne").unwrap();
    assert_eq!(kept.access_token, "access");
}
