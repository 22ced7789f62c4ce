use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};
use crate::schema::recipes;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteRecipeRequest {
    pub id: Option<Uuid>,
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "recipes",
    request_body = DeleteRecipeRequest,
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Missing recipe ID", body = ErrorResponse),
        (status = 403, description = "Invalid session or not the owner", body = ErrorResponse),
        (status = 404, description = "No such recipe", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<DeleteRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    let id = request
        .id
        .ok_or_else(|| ApiError::Validation("Missing recipe ID".to_string()))?;

    let mut conn = state.pool.get()?;

    let owner: Uuid = recipes::table
        .find(id)
        .select(recipes::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound)?;

    if owner != auth.user.id {
        return Err(ApiError::Forbidden("Not authorized to delete this recipe"));
    }

    diesel::delete(recipes::table.find(id)).execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
