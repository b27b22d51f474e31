//! Error type shared by every pipeline stage.
//!
//! Low level failures (HTTP, JSON, SQLite, IO) convert into [`Error`] with `?`.
//! The pipeline driver wraps them with [`StageExt::stage`] so that a failed
//! run reports which step broke instead of a bare transport error.

use std::fmt;

use thiserror::Error;

use crate::etl::RunState;

/// Steps of a playlist run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadConfig,
    Authenticate,
    ResolveArtist,
    ListAlbums,
    CollectTracks,
    SampleTracks,
    CreatePlaylist,
    FindPlaylist,
    AddTracks,
    SetVisibility,
    BuildRecords,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadConfig => "load config",
            Stage::Authenticate => "authenticate",
            Stage::ResolveArtist => "resolve artist",
            Stage::ListAlbums => "list albums",
            Stage::CollectTracks => "collect tracks",
            Stage::SampleTracks => "sample tracks",
            Stage::CreatePlaylist => "create playlist",
            Stage::FindPlaylist => "find playlist",
            Stage::AddTracks => "add tracks",
            Stage::SetVisibility => "set visibility",
            Stage::BuildRecords => "build records",
            Stage::Persist => "persist records",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("artist not found: {0}")]
    ArtistNotFound(String),
    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),
    #[error("not enough tracks to sample: wanted {wanted}, found {available}")]
    InsufficientTracks { wanted: usize, available: usize },
    #[error("null value in column {column} of row {row}")]
    NullField { row: usize, column: &'static str },
    #[error("invalid run transition {from} -> {to}")]
    InvalidTransition { from: RunState, to: RunState },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("db error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Stage the error was tagged with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with stage tags peeled off.
    pub fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Tags the error of a `Result` with the stage it happened in.
pub trait StageExt<T> {
    fn stage(self, stage: Stage) -> Result<T, Error>;
}

impl<T, E> StageExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn stage(self, stage: Stage) -> Result<T, Error> {
        self.map_err(|e| Error::Stage {
            stage,
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tag_wraps_and_unwraps() {
        let res: Result<(), Error> = Err(Error::ArtistNotFound("Nobody".into()));
        let err = res.stage(Stage::ResolveArtist).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::ResolveArtist));
        assert!(matches!(err.root(), Error::ArtistNotFound(name) if name == "Nobody"));
        assert_eq!(
            err.to_string(),
            "resolve artist failed: artist not found: Nobody"
        );
    }
}
