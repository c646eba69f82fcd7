use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

// Opaque server-side failure. The message is logged, never sent to the
// client.
pub struct InternalError {
    pub message: String,
}

impl InternalError {
    pub fn new(message: String) -> InternalError {
        InternalError { message }
    }
}

impl From<askama::Error> for InternalError {
    fn from(source: askama::Error) -> InternalError {
        InternalError::new(format!("Failed to render template: {source}"))
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        error!(
            "Error encountered while processing request: {}",
            self.message
        );
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
