use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{create_session, hash_password};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{NewLocalCredential, NewUser};
use crate::schema::{users, users_local};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignUpResponse {
    pub session_id: String,
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/sign-up",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created, session established", body = SignUpResponse),
        (status = 400, description = "Missing field or email already registered", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, ApiError> {
    let (name, email, password) = match (request.name, request.email, request.password) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            return Err(ApiError::Validation(
                "Missing data needed to sign up".to_string(),
            ))
        }
    };

    let password_hash = hash_password(&password).map_err(|e| ApiError::Hash(e.to_string()))?;

    let mut conn = state.pool.get()?;

    let created: Result<Uuid, diesel::result::Error> = conn.transaction(|conn| {
        let user_id: Uuid = diesel::insert_into(users::table)
            .values(&NewUser {
                name: &name,
                email: Some(&email),
            })
            .returning(users::id)
            .get_result(conn)?;

        diesel::insert_into(users_local::table)
            .values(&NewLocalCredential {
                email: &email,
                password_hash: &password_hash,
                user_id,
            })
            .execute(conn)?;

        Ok(user_id)
    });

    let user_id = match created {
        Ok(user_id) => user_id,
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(ApiError::EmailTaken)
        }
        Err(e) => return Err(e.into()),
    };

    let session_id = create_session(&mut conn, user_id)?;

    Ok(Json(SignUpResponse { session_id, name }))
}
