use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{create_session, verify_password};
use crate::error::{ApiError, ErrorResponse};
use crate::models::LocalCredential;
use crate::schema::{users, users_local};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignInResponse {
    pub session_id: String,
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/sign-in",
    tag = "auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session established", body = SignInResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::Validation(
                "Missing data needed to sign in".to_string(),
            ))
        }
    };

    let mut conn = state.pool.get()?;

    // Unknown email and wrong password are indistinguishable to the caller
    let credential: LocalCredential = users_local::table
        .find(&email)
        .select(LocalCredential::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&password, &credential.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let name: String = users::table
        .find(credential.user_id)
        .select(users::name)
        .first(&mut conn)?;

    let session_id = create_session(&mut conn, credential.user_id)?;

    Ok(Json(SignInResponse { session_id, name }))
}
