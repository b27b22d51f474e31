use std::path::Path;

use chrono::Local;

use crate::{
    Stage, StageExt,
    cli::load_config,
    error,
    etl::{self, RunContext, RunSettings},
    info,
    sink::{PersistOutcome, RecordStore},
    spotify::{self, SpotifyClient},
    success, warning,
};

pub async fn playlist(config_path: Option<&Path>, settings: RunSettings) {
    let config = load_config(config_path);

    let token = spotify::auth::authenticate(&config).await;
    let token = match etl::require_token(token, &config.username) {
        Ok(token) => token,
        Err(e) => {
            warning!("{}", e.root());
            return;
        }
    };

    let mut store = match RecordStore::open(&config.database_location).stage(Stage::Persist) {
        Ok(store) => store,
        Err(e) => error!("{}", e),
    };
    info!("Database opened successfully");

    let service = SpotifyClient::new(config.api_url.clone(), token.access_token);
    let mut ctx = RunContext::authenticated(config, service, settings, Local::now());

    let report = match etl::run(&mut ctx, &mut store, &mut rand::rng()).await {
        Ok(report) => report,
        Err(e) => error!("{}", e),
    };

    match report.outcome {
        Some(PersistOutcome::Inserted(n)) => {
            success!("Stored {} songs of playlist {}", n, report.playlist_name)
        }
        Some(PersistOutcome::AlreadyStored) => warning!("Data already exists in the database"),
        None => {}
    }

    drop(store);
    info!("Database closed successfully");
}
