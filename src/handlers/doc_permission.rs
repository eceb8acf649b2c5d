use axum::extract::Path;
use axum::{Extension, Json};

use crate::db::dbstore;
use crate::models::{ErrorResponse, PermissionResponse, ServiceError, SetPermissionRequest};
use crate::services::permission_service;

/// Grant or change a permission on a document; owner only
#[utoipa::path(
    put,
    path = "/api/documents/{document_id}/permissions",
    params(
        ("document_id" = String, Path, description = "Document identifier")
    ),
    request_body = SetPermissionRequest,
    responses(
        (status = 200, description = "Permission recorded", body = PermissionResponse),
        (status = 403, description = "Requester is not the owner", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn set_document_permission(
    Path(document_id): Path<String>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<SetPermissionRequest>,
) -> Result<Json<PermissionResponse>, ServiceError> {
    let db = dbstore::require_db()?;

    permission_service::set_permission(
        &db,
        &document_id,
        &user_id,
        &payload.user_id,
        &payload.permission,
    )
    .await?;

    Ok(Json(PermissionResponse {
        status: "success".to_string(),
    }))
}
