use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::trivia::client::TriviaError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("Upstream rejected the request (code {code})")]
    UpstreamRejected { code: i64 },
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl From<TriviaError> for WebError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::UpstreamRejected { code } => WebError::UpstreamRejected { code },
            TriviaError::Transport(_) | TriviaError::MalformedPayload => {
                WebError::UpstreamUnavailable(err.to_string())
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            WebError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("Session {id} not found") }),
            ),
            // The rejection code travels in the body so clients can tell
            // "no matching questions" apart from a broken upstream.
            WebError::UpstreamRejected { code } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Failed to get questions", "code": code }),
            ),
            WebError::UpstreamUnavailable(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            WebError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            WebError::JsonSerialization(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("JSON error: {err}") }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T, E = WebError> = std::result::Result<T, E>;
