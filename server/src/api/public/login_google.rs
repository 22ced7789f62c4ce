use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{create_session, VerifiedIdentity};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{NewGoogleCredential, NewUser};
use crate::schema::{users, users_google};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GoogleLoginRequest {
    pub id_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GoogleLoginResponse {
    pub session_id: String,
    pub email: String,
    pub name: String,
}

fn lookup_google_user(
    conn: &mut PgConnection,
    google_id: &str,
) -> Result<Option<Uuid>, diesel::result::Error> {
    users_google::table
        .find(google_id)
        .select(users_google::user_id)
        .first(conn)
        .optional()
}

/// Look up the user bound to this Google subject id, creating the
/// user + credential pair on first login. A concurrent first login can
/// lose the insert race on the google_id primary key; the loser re-fetches
/// the winner's row instead of surfacing the conflict.
fn find_or_create_google_user(
    conn: &mut PgConnection,
    identity: &VerifiedIdentity,
) -> Result<Uuid, diesel::result::Error> {
    if let Some(user_id) = lookup_google_user(conn, &identity.subject)? {
        return Ok(user_id);
    }

    let created: Result<Uuid, diesel::result::Error> = conn.transaction(|conn| {
        let user_id: Uuid = diesel::insert_into(users::table)
            .values(&NewUser {
                name: &identity.name,
                email: Some(&identity.email),
            })
            .returning(users::id)
            .get_result(conn)?;

        diesel::insert_into(users_google::table)
            .values(&NewGoogleCredential {
                google_id: &identity.subject,
                user_id,
            })
            .execute(conn)?;

        Ok(user_id)
    });

    match created {
        Ok(user_id) => Ok(user_id),
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            lookup_google_user(conn, &identity.subject)?.ok_or(diesel::NotFound)
        }
        Err(e) => Err(e),
    }
}

#[utoipa::path(
    post,
    path = "/login/google",
    tag = "auth",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Session established", body = GoogleLoginResponse),
        (status = 400, description = "Missing id_token", body = ErrorResponse),
        (status = 403, description = "Token rejected by the verifier", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn login_google(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> Result<Json<GoogleLoginResponse>, ApiError> {
    let id_token = request.id_token.ok_or_else(|| {
        ApiError::Validation("Missing Google id_token in login request".to_string())
    })?;

    let identity = state
        .verifier
        .verify(&id_token)
        .await
        .map_err(ApiError::InvalidIdToken)?;

    let mut conn = state.pool.get()?;

    let user_id = find_or_create_google_user(&mut conn, &identity)?;
    let session_id = create_session(&mut conn, user_id)?;

    Ok(Json(GoogleLoginResponse {
        session_id,
        email: identity.email,
        name: identity.name,
    }))
}
