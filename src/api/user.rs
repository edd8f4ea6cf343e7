use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{error::LibraryError, utils};

use super::{ApiError, AppState};

pub async fn user_library(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let user_id = params
        .get("userId")
        .map(|id| id.trim())
        .unwrap_or_default()
        .to_string();

    if user_id.is_empty() {
        return Err(ApiError::new(
            user_id,
            LibraryError::BadRequest("userId query parameter is required".to_string()),
        ));
    }

    let token = match utils::bearer_token(&headers) {
        Some(token) => token,
        None => match &state.tokens {
            Some(tokens) => tokens
                .get_valid_token()
                .await
                .map_err(|e| ApiError::new(&user_id, e))?,
            None => {
                warn!(user_id = %user_id, "No bearer token available, calling upstream without one");
                String::new()
            }
        },
    };

    let body = state
        .library
        .get_or_compute(&user_id, &token)
        .await
        .map_err(|e| ApiError::new(&user_id, e))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
