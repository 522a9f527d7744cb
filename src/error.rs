use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Failures surfaced by the loader, the preference store and the size probe.
///
/// The view-model recovers from each one locally (empty project list,
/// placeholder media, "unavailable" size). Only an explicit reload reports
/// them over HTTP.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("remote request failed: {0}")]
    Remote(String),

    #[error("remote responded with status {0}")]
    Status(u16),

    #[error("remote response has no content length")]
    MissingLength,

    #[error("preferences unavailable: {0}")]
    Preferences(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;

impl ResponseError for FolioError {
    fn status_code(&self) -> StatusCode {
        match self {
            FolioError::Remote(_) | FolioError::Status(_) | FolioError::MissingLength => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
