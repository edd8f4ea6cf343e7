use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::LibraryError;

/// A failed library request, rendered as a JSON string body.
#[derive(Debug)]
pub struct ApiError {
    user_id: String,
    error: LibraryError,
}

impl ApiError {
    pub fn new(user_id: impl Into<String>, error: LibraryError) -> Self {
        Self {
            user_id: user_id.into(),
            error,
        }
    }

    pub fn error(&self) -> &LibraryError {
        &self.error
    }
}

/// HTTP status for each error kind.
pub fn status_code(error: &LibraryError) -> StatusCode {
    match error {
        LibraryError::BadRequest(_) => StatusCode::BAD_REQUEST,
        LibraryError::Upstream { status: 404, .. } => StatusCode::NOT_FOUND,
        LibraryError::Upstream { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        LibraryError::Upstream { .. }
        | LibraryError::Request(_)
        | LibraryError::Decode { .. }
        | LibraryError::PaginationLimitExceeded { .. }
        | LibraryError::Token(_) => StatusCode::BAD_GATEWAY,
        LibraryError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
        LibraryError::Config(_) | LibraryError::Task(_) | LibraryError::Serialize(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_code(&self.error);
        if status.is_server_error() {
            error!(user_id = %self.user_id, status = status.as_u16(), error = %self.error, "Library request failed");
        } else {
            warn!(user_id = %self.user_id, status = status.as_u16(), error = %self.error, "Library request rejected");
        }

        let message = format!(
            "Error fetching user library for {}: {}",
            self.user_id, self.error
        );
        (status, Json(message)).into_response()
    }
}
