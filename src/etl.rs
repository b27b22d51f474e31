//! Pipeline driver.
//!
//! A run moves through [`RunState`] strictly forward:
//!
//! ```text
//! Unauthenticated -> Authenticated -> AlbumsListed -> TracksSampled
//!     -> PlaylistCreated -> TracksAdded -> VisibilitySet
//! ```
//!
//! Everything a stage needs travels in [`RunContext`], which is built once
//! after authentication. The first failing stage ends the run and its error is
//! tagged with the [`Stage`] it came from.

use std::{fmt, time::Duration};

use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::{
    Error, Res, Stage, StageExt, catalog,
    config::Config,
    info, publisher, sampler,
    sink::{self, PersistOutcome, RecordStore},
    spotify::MusicService,
    success,
    types::{PlaylistRecord, Token},
    utils,
};

pub const DEFAULT_ARTIST: &str = "Talking Heads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    Unauthenticated,
    Authenticated,
    AlbumsListed,
    TracksSampled,
    PlaylistCreated,
    TracksAdded,
    VisibilitySet,
}

impl RunState {
    /// The only state this one may move to.
    pub fn next(self) -> Option<RunState> {
        match self {
            RunState::Unauthenticated => Some(RunState::Authenticated),
            RunState::Authenticated => Some(RunState::AlbumsListed),
            RunState::AlbumsListed => Some(RunState::TracksSampled),
            RunState::TracksSampled => Some(RunState::PlaylistCreated),
            RunState::PlaylistCreated => Some(RunState::TracksAdded),
            RunState::TracksAdded => Some(RunState::VisibilitySet),
            RunState::VisibilitySet => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// User choices for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub artist_name: String,
    pub sample_size: usize,
    /// Make the playlist private once it is filled.
    pub make_private: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            artist_name: DEFAULT_ARTIST.to_string(),
            sample_size: sampler::DEFAULT_SAMPLE_SIZE,
            make_private: true,
        }
    }
}

pub struct RunContext<S> {
    pub config: Config,
    pub service: S,
    pub settings: RunSettings,
    /// Captured once; date and creation id of every record derive from it.
    pub started_at: DateTime<Local>,
    state: RunState,
}

impl<S: MusicService> RunContext<S> {
    /// Context for a run whose service already holds a valid token.
    pub fn authenticated(
        config: Config,
        service: S,
        settings: RunSettings,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            config,
            service,
            settings,
            started_at,
            state: RunState::Authenticated,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Moves to `to`, which must be the direct successor of the current state.
    pub fn advance(&mut self, to: RunState) -> Res<()> {
        if self.state.next() != Some(to) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

/// Leaves [`RunState::Unauthenticated`]: the token the login step produced, or
/// an [`Error::Auth`] tagged [`Stage::Authenticate`] when there is none.
pub fn require_token(token: Option<Token>, username: &str) -> Res<Token> {
    token
        .ok_or_else(|| Error::Auth(format!("Can't get token for {username}")))
        .stage(Stage::Authenticate)
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub playlist_name: String,
    pub playlist_id: String,
    pub records: Vec<PlaylistRecord>,
    /// `None` when there was nothing to store.
    pub outcome: Option<PersistOutcome>,
    pub final_state: RunState,
}

/// Runs catalog discovery through record persistence.
pub async fn run<S, R>(
    ctx: &mut RunContext<S>,
    store: &mut RecordStore,
    rng: &mut R,
) -> Res<RunReport>
where
    S: MusicService,
    R: Rng + ?Sized,
{
    let artist = ctx.settings.artist_name.clone();
    let count = ctx.settings.sample_size;
    let date = utils::run_date(&ctx.started_at);

    info!("Looking up artist {}", artist);
    let artist_id = catalog::resolve_artist(&ctx.service, &artist)
        .await
        .stage(Stage::ResolveArtist)?;
    let albums = catalog::list_albums(&ctx.service, &artist_id)
        .await
        .stage(Stage::ListAlbums)?;
    let album_ids = catalog::filter_reissues(&albums);
    ctx.advance(RunState::AlbumsListed)?;
    info!(
        "{} of {} albums left after dropping reissues",
        album_ids.len(),
        albums.len()
    );

    let pb = spinner("Fetching album tracks...");
    let tracks = sampler::collect_tracks(&ctx.service, &album_ids).await;
    pb.finish_and_clear();
    let tracks = tracks.stage(Stage::CollectTracks)?;
    let sampled = sampler::sample_tracks(&tracks, count, rng).stage(Stage::SampleTracks)?;
    ctx.advance(RunState::TracksSampled)?;
    info!("Picked {} of {} tracks", sampled.len(), tracks.len());

    let playlist_name = publisher::create_playlist(
        &ctx.service,
        &ctx.config.playlist_owner,
        &artist,
        count,
        &date,
    )
    .await
    .stage(Stage::CreatePlaylist)?;
    ctx.advance(RunState::PlaylistCreated)?;
    success!("Created playlist {}", playlist_name);

    let playlist_id = publisher::find_playlist_id_by_name(&ctx.service, &playlist_name)
        .await
        .stage(Stage::FindPlaylist)?;
    publisher::add_tracks(&ctx.service, &playlist_id, &sampled)
        .await
        .stage(Stage::AddTracks)?;
    ctx.advance(RunState::TracksAdded)?;
    success!("Added {} tracks", sampled.len());

    if ctx.settings.make_private {
        publisher::set_visibility(&ctx.service, &playlist_id, false)
            .await
            .stage(Stage::SetVisibility)?;
        ctx.advance(RunState::VisibilitySet)?;
        info!("Playlist is private now");
    }

    let records = sink::build_records(
        &sampled,
        &artist,
        &playlist_id,
        &date,
        utils::creation_id(&ctx.started_at),
    );

    let outcome = if sink::validate(&records).stage(Stage::BuildRecords)? {
        Some(store.persist(&records).stage(Stage::Persist)?)
    } else {
        info!("No songs in playlist. Finishing execution");
        None
    };

    Ok(RunReport {
        playlist_name,
        playlist_id,
        records,
        outcome,
        final_state: ctx.state(),
    })
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
