use std::path::PathBuf;

use chrono::Utc;

use crate::{Error, Res, config::Config, spotify, types::Token};

/// Seconds before expiry at which a token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Caches the access token of one user on disk and refreshes it on demand.
pub struct TokenManager {
    config: Config,
    token: Token,
}

impl TokenManager {
    pub fn new(config: &Config, token: Token) -> Self {
        TokenManager {
            config: config.clone(),
            token,
        }
    }

    pub async fn load(config: &Config) -> Res<Self> {
        let path = Self::token_path(&config.username);
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self::new(config, token))
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path(&self.config.username);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns a token that is valid for at least a few more minutes,
    /// refreshing and re-persisting it when needed.
    pub async fn get_valid_token(&mut self) -> Res<Token> {
        if is_expired(&self.token, Utc::now().timestamp() as u64) {
            if self.token.refresh_token.is_empty() {
                return Err(Error::Auth("token expired and no refresh token".to_string()));
            }
            self.token =
                spotify::auth::refresh_token(&self.config, &self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.clone())
    }

    fn token_path(username: &str) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("sporlmix/cache/token-{username}.json"));
        path
    }
}

fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
