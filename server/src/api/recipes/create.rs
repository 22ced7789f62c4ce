use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;
use crate::AppState;

use super::RecipeResponse;

/// Fields are optional so that presence can be validated explicitly: an
/// absent field is a 400, while an empty string or empty list is data.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub images: Option<Vec<String>>,
}

fn validate(request: CreateRecipeRequest) -> Result<(String, String, String, Vec<String>), ApiError> {
    match (request.url, request.title, request.notes, request.images) {
        (Some(url), Some(title), Some(notes), Some(images)) => Ok((url, title, notes, images)),
        _ => Err(ApiError::Validation(
            "Missing data needed to create recipe".to_string(),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 403, description = "Invalid session", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let (url, title, notes, images) = validate(request)?;
    let images: Vec<Option<String>> = images.into_iter().map(Some).collect();

    let mut conn = state.pool.get()?;

    let new_recipe = NewRecipe {
        user_id: auth.user.id,
        url: &url,
        title: &title,
        notes: &notes,
        images: &images,
    };

    let recipe: Recipe = diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        url: Option<&str>,
        title: Option<&str>,
        notes: Option<&str>,
        images: Option<Vec<String>>,
    ) -> CreateRecipeRequest {
        CreateRecipeRequest {
            url: url.map(String::from),
            title: title.map(String::from),
            notes: notes.map(String::from),
            images,
        }
    }

    #[test]
    fn all_fields_present_passes() {
        let ok = validate(request(
            Some("http://example.com"),
            Some("Soup"),
            Some("good"),
            Some(vec!["a.jpg".into()]),
        ));
        assert!(ok.is_ok());
    }

    #[test]
    fn empty_values_count_as_present() {
        let ok = validate(request(Some(""), Some(""), Some(""), Some(vec![])));
        assert!(ok.is_ok());
    }

    #[test]
    fn any_absent_field_is_rejected() {
        for req in [
            request(None, Some("t"), Some("n"), Some(vec![])),
            request(Some("u"), None, Some("n"), Some(vec![])),
            request(Some("u"), Some("t"), None, Some(vec![])),
            request(Some("u"), Some("t"), Some("n"), None),
        ] {
            assert!(matches!(validate(req), Err(ApiError::Validation(_))));
        }
    }
}
