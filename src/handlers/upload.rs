use axum::extract::Multipart;
use axum::{Extension, Json};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config;
use crate::models::{ErrorResponse, ServiceError, UploadResponse};

/// Write an uploaded file under `dir` as `{user_id}_{filename}`.
///
/// The filename is flattened so a crafted name cannot escape the upload
/// directory.
pub async fn store_upload(
    dir: &Path,
    user_id: &str,
    filename: &str,
    data: &[u8],
) -> Result<PathBuf, ServiceError> {
    let safe_name = filename.replace(['/', '\\'], "_");
    let path = dir.join(format!("{}_{}", user_id, safe_name));

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ServiceError::Internal(format!("Failed to store upload: {}", e)))?;

    Ok(path)
}

/// Upload a file as multipart form data
#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file field", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    Extension(user_id): Extension<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let config = config::get_config();
        let path = store_upload(Path::new(&config.upload_dir), &user_id, &filename, &data).await?;

        info!("User {} uploaded {} ({} bytes)", user_id, filename, data.len());

        return Ok(Json(UploadResponse {
            filename,
            path: path.display().to_string(),
        }));
    }

    Err(ServiceError::BadRequest("Missing 'file' field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_lands_under_the_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_upload(dir.path(), "u1", "notes.txt", b"hello")
            .await
            .unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");
        assert_eq!(path.file_name().unwrap(), "u1_notes.txt");
    }

    #[tokio::test]
    async fn path_separators_in_filenames_are_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_upload(dir.path(), "u1", "../../etc/passwd", b"x")
            .await
            .unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(path.file_name().unwrap(), "u1_.._.._etc_passwd");
    }
}
