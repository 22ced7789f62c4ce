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
pub struct UpdateRecipeRequest {
    pub id: Option<Uuid>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub images: Option<Vec<String>>,
}

type UpdateFields = (Uuid, String, String, String, Vec<String>);

fn validate(request: UpdateRecipeRequest) -> Result<UpdateFields, ApiError> {
    match (
        request.id,
        request.url,
        request.title,
        request.notes,
        request.images,
    ) {
        (Some(id), Some(url), Some(title), Some(notes), Some(images)) => {
            Ok((id, url, title, notes, images))
        }
        _ => Err(ApiError::Validation(
            "Missing data needed to update recipe".to_string(),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/",
    tag = "recipes",
    request_body = UpdateRecipeRequest,
    responses(
        (status = 204, description = "Recipe replaced"),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 403, description = "Invalid session or not the owner", body = ErrorResponse),
        (status = 404, description = "No such recipe", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    // authenticate (extractor) -> validate shape -> authorize ownership -> mutate
    let (id, url, title, notes, images) = validate(request)?;

    let mut conn = state.pool.get()?;

    let owner: Uuid = recipes::table
        .find(id)
        .select(recipes::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound)?;

    if owner != auth.user.id {
        return Err(ApiError::Forbidden("Not authorized to edit this recipe"));
    }

    // Full replacement: PUT semantics, no field-level merging
    let images: Vec<Option<String>> = images.into_iter().map(Some).collect();
    diesel::update(recipes::table.find(id))
        .set((
            recipes::url.eq(&url),
            recipes::title.eq(&title),
            recipes::notes.eq(&notes),
            recipes::images.eq(&images),
            recipes::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_must_be_present() {
        let request = UpdateRecipeRequest {
            id: None,
            url: Some("u".into()),
            title: Some("t".into()),
            notes: Some("n".into()),
            images: Some(vec![]),
        };
        assert!(matches!(validate(request), Err(ApiError::Validation(_))));
    }

    #[test]
    fn complete_request_passes() {
        let id = Uuid::new_v4();
        let request = UpdateRecipeRequest {
            id: Some(id),
            url: Some("u".into()),
            title: Some("t".into()),
            notes: Some(String::new()),
            images: Some(vec!["a.jpg".into()]),
        };
        let (got_id, ..) = validate(request).unwrap();
        assert_eq!(got_id, id);
    }
}
