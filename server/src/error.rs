use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Error body shared by all endpoints. `msg` is the stable, user-facing
/// message; `error` carries the underlying diagnostic when there is one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Unified error type for the whole API. Every handler returns
/// `Result<_, ApiError>`; the mapping to an HTTP status and JSON body
/// happens here and nowhere else.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// Absent, unknown or expired bearer token. Also covers a storage
    /// failure during session resolution; the original folded both into
    /// the same externally-visible 403 and we keep that contract.
    #[error("Invalid session")]
    InvalidSession,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Recipe not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid Google auth token")]
    InvalidIdToken(String),

    #[error("Database error")]
    Db(#[from] diesel::result::Error),

    #[error("Database connection failed")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Failed to store image")]
    Blob(#[from] std::io::Error),

    #[error("Failed to hash password")]
    Hash(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::EmailTaken => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            // 403 (not 401) for auth failures, matching the original API
            ApiError::InvalidSession | ApiError::Forbidden(_) | ApiError::InvalidIdToken(_) => {
                StatusCode::FORBIDDEN
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Db(_) | ApiError::Pool(_) | ApiError::Blob(_) | ApiError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn diagnostic(&self) -> Option<String> {
        match self {
            ApiError::InvalidIdToken(d) => Some(d.clone()),
            ApiError::Db(e) => Some(e.to_string()),
            ApiError::Pool(e) => Some(e.to_string()),
            ApiError::Blob(e) => Some(e.to_string()),
            ApiError::Hash(d) => Some(d.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, diagnostic = ?self.diagnostic(), "request failed");
        }
        let body = ErrorResponse {
            msg: self.to_string(),
            error: self.diagnostic(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_api_contract() {
        assert_eq!(
            ApiError::Validation("Missing recipe ID".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::EmailTaken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidSession.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Forbidden("Not authorized to edit this recipe").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::InvalidIdToken("aud mismatch".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Hash("bad params".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn diagnostic_only_present_for_server_side_failures() {
        assert!(ApiError::InvalidSession.diagnostic().is_none());
        assert!(ApiError::NotFound.diagnostic().is_none());
        assert_eq!(
            ApiError::Hash("oops".into()).diagnostic().as_deref(),
            Some("oops")
        );
    }
}
