use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    Error, Res,
    config::{Config, PLAYLIST_SCOPE},
    info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthState, Token},
    utils, warning,
};

/// Obtains an access token for the configured user.
///
/// A cached token is reused (and refreshed when close to expiry). Without a
/// usable cache the interactive authorization code flow runs:
/// 1. A random `state` value is generated and stored in shared state
/// 2. The local callback server is started
/// 3. The authorization URL is opened in the default browser
/// 4. The callback exchanges the code for a token
/// 5. The token is persisted for later runs
///
/// # Returns
///
/// `None` when no token could be obtained. The caller decides how to report
/// it; a missing token is not an error in the pipeline's sense.
pub async fn authenticate(config: &Config) -> Option<Token> {
    match TokenManager::load(config).await {
        Ok(mut manager) => match manager.get_valid_token().await {
            Ok(token) => return Some(token),
            Err(e) => warning!("Cached token unusable, authorizing again: {}", e),
        },
        Err(_) => info!("No cached token for {}, authorizing", config.username),
    }

    let token = authorize(config).await?;

    let manager = TokenManager::new(config, token.clone());
    if let Err(e) = manager.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
    Some(token)
}

/// Runs the browser based authorization code flow.
async fn authorize(config: &Config) -> Option<Token> {
    let shared_state = Arc::new(Mutex::new(Some(AuthState {
        state: utils::generate_state(),
        token: None,
    })));

    let auth_url = match authorize_url(config, &current_state(&shared_state).await) {
        Ok(url) => url,
        Err(e) => {
            warning!("{}", e);
            return None;
        }
    };

    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::new(config.clone());
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state, &server).await;
    server.abort();

    if token.is_none() {
        warning!("Authentication failed or timed out.");
    }
    token
}

async fn current_state(shared_state: &Arc<Mutex<Option<AuthState>>>) -> String {
    let lock = shared_state.lock().await;
    lock.as_ref().map(|s| s.state.clone()).unwrap_or_default()
}

/// Builds the authorization URL the user is sent to.
pub fn authorize_url(config: &Config, state: &str) -> Res<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
            ("scope", PLAYLIST_SCOPE),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid auth url {}: {}", config.auth_url, e)))
}

/// Waits at most 60 seconds for the callback handler to store a token.
/// Gives up as soon as the callback server has stopped.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<AuthState>>>,
    server: &JoinHandle<()>,
) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|s| s.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        if server.is_finished() {
            return None;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
///
/// The client authenticates with HTTP basic auth using its id and secret.
pub async fn exchange_code(config: &Config, code: &str) -> Res<Token> {
    let res = Client::new()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    token_from_json(&json, None)
}

/// Refreshes an access token. Spotify may omit a new refresh token, in which
/// case the previous one is kept.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Res<Token> {
    let res = Client::new()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    token_from_json(&json, Some(refresh_token))
}

fn token_from_json(json: &Value, previous_refresh: Option<&str>) -> Res<Token> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Auth("token response without access_token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .or(previous_refresh)
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
