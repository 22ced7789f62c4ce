use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};

use crate::error::ApiError;
use crate::models::User;
use crate::AppState;

use super::session::get_user_from_token;

/// Extractor that validates the `Authorization: Bearer <token>` header and
/// resolves it to the authenticated user. Handlers that take an `AuthUser`
/// are protected; everything else is public.
///
/// The raw token is retained so logout can destroy the session it arrived
/// with.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

/// Parses an Authorization header of the exact form `Bearer <token>`.
/// Any other shape is treated as absent, not malformed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = bearer_token(&parts.headers)
            .ok_or(ApiError::InvalidSession)?
            .to_string();

        let user = get_user_from_token(&state.pool, &token).ok_or(ApiError::InvalidSession)?;

        Ok(AuthUser { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_well_formed_bearer_token() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_header_is_absent() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn other_schemes_are_absent_not_malformed() {
        assert_eq!(bearer_token(&headers_with_auth("Basic abc123")), None);
        assert_eq!(bearer_token(&headers_with_auth("abc123")), None);
        // Case matters: the original matched the literal prefix
        assert_eq!(bearer_token(&headers_with_auth("bearer abc123")), None);
    }
}
