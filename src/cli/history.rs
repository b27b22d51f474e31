use std::path::Path;

use tabled::Table;

use crate::{
    Stage, StageExt, cli::load_config, error, info, sink::RecordStore, types::RecordTableRow,
};

pub async fn history(config_path: Option<&Path>, limit: usize) {
    let config = load_config(config_path);

    let store = match RecordStore::open(&config.database_location).stage(Stage::Persist) {
        Ok(store) => store,
        Err(e) => error!("{}", e),
    };

    let records = match store.history(limit) {
        Ok(records) => records,
        Err(e) => error!("Failed to read playlist records: {}", e),
    };

    if records.is_empty() {
        info!("No playlists stored in {}", config.database_location.display());
        return;
    }

    let rows: Vec<RecordTableRow> = records.into_iter().map(RecordTableRow::from).collect();
    println!("{}", Table::new(rows));
}
