use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadImageResponse {
    pub filename: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Derive the storage name for an upload: a fresh uuid with the original
/// extension. Uploads whose filename carries no extension are rejected.
fn storage_filename(original: &str) -> Option<String> {
    let (stem, ext) = original.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!("{}.{}", Uuid::new_v4(), ext))
}

#[utoipa::path(
    post,
    path = "/image",
    tag = "images",
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "No usable image file in request", body = ErrorResponse),
        (status = 403, description = "Invalid session", body = ErrorResponse),
        (status = 500, description = "Blob store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>, ApiError> {
    // Find the `image` field, skipping any other form parts
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err(ApiError::Validation(
                    "No image file found in request".to_string(),
                ))
            }
            Err(e) => {
                return Err(ApiError::Validation(format!(
                    "Failed to read multipart data: {}",
                    e.body_text()
                )))
            }
        }
    };

    let original_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation("No filename found in request".to_string()))?;

    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation("No content type found in request".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read file data: {}", e.body_text())))?;

    let filename = storage_filename(&original_name)
        .ok_or_else(|| ApiError::Validation("Filename had no extension".to_string()))?;

    // The caller attaches the filename to a recipe in a follow-up PUT;
    // if that call never happens the blob is orphaned, by contract.
    state.blobs.put(&filename, &content_type, &bytes).await?;

    Ok(Json(UploadImageResponse { filename }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_extension() {
        let name = storage_filename("photo.jpg").unwrap();
        assert!(name.ends_with(".jpg"));
        let generated = name.strip_suffix(".jpg").unwrap();
        assert!(Uuid::parse_str(generated).is_ok());
    }

    #[test]
    fn last_extension_wins_for_dotted_names() {
        let name = storage_filename("archive.tar.gz").unwrap();
        assert!(name.ends_with(".gz"));
    }

    #[test]
    fn rejects_names_without_extension() {
        assert_eq!(storage_filename("photo"), None);
        assert_eq!(storage_filename("photo."), None);
        assert_eq!(storage_filename(".gitignore"), None);
    }

    #[test]
    fn generated_names_are_unique() {
        assert_ne!(
            storage_filename("photo.jpg").unwrap(),
            storage_filename("photo.jpg").unwrap()
        );
    }
}
