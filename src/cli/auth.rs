use std::path::Path;

use crate::{cli::load_config, spotify, success, warning};

pub async fn auth(config_path: Option<&Path>) {
    let config = load_config(config_path);

    match spotify::auth::authenticate(&config).await {
        Some(token) => success!("Token for {} is valid ({})", config.username, token.scope),
        None => warning!("Can't get token for {}", config.username),
    }
}
