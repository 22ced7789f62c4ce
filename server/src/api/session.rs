use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

use crate::auth::{destroy_session, AuthUser};
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Both route names survived across iterations of the original; serve both.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/sign-out", post(logout))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session destroyed"),
        (status = 403, description = "Invalid session", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(auth: AuthUser, State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut conn = state.pool.get()?;

    // Requires a live session to call, but the delete itself is idempotent
    destroy_session(&mut conn, &auth.token)?;

    Ok(StatusCode::OK)
}

#[derive(OpenApi)]
#[openapi(paths(logout))]
pub struct ApiDoc;
