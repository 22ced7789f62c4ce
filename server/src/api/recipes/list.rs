use axum::extract::State;
use axum::Json;
use diesel::prelude::*;

use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;

use super::RecipeResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes owned by the session user", body = Vec<RecipeResponse>),
        (status = 403, description = "Invalid session", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let mut conn = state.pool.get()?;

    // Insertion order; the API promises no particular ordering
    let rows: Vec<Recipe> = recipes::table
        .filter(recipes::user_id.eq(auth.user.id))
        .order(recipes::created_at.asc())
        .select(Recipe::as_select())
        .load(&mut conn)?;

    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}
