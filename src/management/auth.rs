use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::{Credentials, Settings},
    error::Result,
    spotify,
    types::Token,
};

/// Seconds before expiry at which a token is replaced.
const REFRESH_MARGIN_SECS: u64 = 240;

/// Hands out an app bearer token, fetching a new one shortly before the
/// current one expires.
///
/// Concurrent callers share one refresh.
pub struct TokenManager {
    http: Client,
    token_url: String,
    credentials: Credentials,
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(token_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(TokenManager {
            http,
            token_url: token_url.to_string(),
            credentials,
            token: Mutex::new(None),
        })
    }

    /// `None` when no client credentials are configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        match &settings.credentials {
            Some(credentials) => Ok(Some(Self::new(
                &settings.token_url,
                credentials.clone(),
                settings.http_timeout,
            )?)),
            None => Ok(None),
        }
    }

    pub async fn get_valid_token(&self) -> Result<String> {
        let mut current = self.token.lock().await;
        if let Some(token) = current.as_ref() {
            if !Self::is_expired(token) {
                return Ok(token.access_token.clone());
            }
        }

        let token = spotify::auth::request_token(&self.http, &self.token_url, &self.credentials).await?;
        info!(expires_in = token.expires_in, "Obtained new access token");

        let access_token = token.access_token.clone();
        *current = Some(token);
        Ok(access_token)
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= token.obtained_at + token.expires_in
    }
}
