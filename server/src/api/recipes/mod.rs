pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::models::Recipe;
use crate::AppState;

/// All recipe operations live at `/`, with the recipe id carried in the
/// request body on PUT and DELETE — the wire shape of the original API.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list::list_recipes)
            .post(create::create_recipe)
            .put(update::update_recipe)
            .delete(delete::delete_recipe),
    )
}

/// Recipe as it appears on the wire. The owner is implied by the session
/// and never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub notes: String,
    pub images: Vec<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            url: recipe.url,
            title: recipe.title,
            notes: recipe.notes,
            images: recipe.images.into_iter().flatten().collect(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        RecipeResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        delete::DeleteRecipeRequest,
    ))
)]
pub struct ApiDoc;
