use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Error, Res, api, config::Config, types::AuthState};

/// Routes of the callback server, sharing the pending authorization and the config.
pub fn router(state: Arc<Mutex<Option<AuthState>>>, config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Serves `/callback` and `/health` until the task is aborted.
pub async fn start_api_server(
    state: Arc<Mutex<Option<AuthState>>>,
    config: Arc<Config>,
) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address).map_err(|e| {
        Error::Config(format!(
            "invalid server address {}: {}",
            config.server_address, e
        ))
    })?;

    let app = router(state, config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
