pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/image", post(upload::upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[derive(OpenApi)]
#[openapi(
    paths(upload::upload_image),
    components(schemas(upload::UploadImageRequest, upload::UploadImageResponse))
)]
pub struct ApiDoc;
