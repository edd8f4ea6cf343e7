use chrono::Utc;
use reqwest::Client;

use crate::{
    config::Credentials,
    error::{LibraryError, Result},
    types::{Token, TokenResponse},
};

/// Requests an app token with the client-credentials grant.
///
/// The token carries no user scope, which is enough to read public
/// playlists.
///
/// # Errors
///
/// Any transport, status or body problem is reported as
/// [`LibraryError::Token`]. The client secret never appears in the message.
pub async fn request_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<Token> {
    let response = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| LibraryError::Token(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LibraryError::Token(format!(
            "token endpoint answered {status}"
        )));
    }

    let json: TokenResponse = response
        .json()
        .await
        .map_err(|e| LibraryError::Token(e.to_string()))?;

    Ok(Token {
        access_token: json.access_token,
        token_type: json.token_type,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
