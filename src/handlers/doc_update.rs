use axum::extract::Path;
use axum::{Extension, Json};
use tracing::info;

use crate::db::dbstore;
use crate::handlers::doc_get::has_document_access;
use crate::models::{
    ErrorResponse, ServiceError, UpdateContentRequest, UpdateContentResponse, VersionResponse,
};

/// Replace a document's content, snapshotting the previous content as a
/// version
#[utoipa::path(
    put,
    path = "/api/documents/{document_id}/content",
    params(
        ("document_id" = String, Path, description = "Document identifier")
    ),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = UpdateContentResponse),
        (status = 403, description = "No write access", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn update_content(
    Path(document_id): Path<String>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<Json<UpdateContentResponse>, ServiceError> {
    let db = dbstore::require_db()?;

    let doc = db
        .get_document(&document_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found", document_id)))?;

    // Writing requires ownership or an explicit write grant.
    let can_write = doc.owner_id == user_id
        || matches!(
            db.get_permission(&document_id, &user_id).await?.as_deref(),
            Some("write") | Some("owner")
        );
    if !can_write {
        return Err(ServiceError::Authorization(
            "No write access to this document".to_string(),
        ));
    }

    let version_id = db
        .update_content_with_version(&document_id, &payload.content, &user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found", document_id)))?;

    info!(
        "Document {} updated by user {}, previous content saved as version {}",
        document_id, user_id, version_id
    );

    Ok(Json(UpdateContentResponse {
        document_id,
        version_id,
        status: "success".to_string(),
    }))
}

/// List a document's version history
#[utoipa::path(
    get,
    path = "/api/documents/{document_id}/versions",
    params(
        ("document_id" = String, Path, description = "Document identifier")
    ),
    responses(
        (status = 200, description = "Version history, newest first", body = [VersionResponse]),
        (status = 403, description = "No access to this document", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn get_versions(
    Path(document_id): Path<String>,
    Extension(user_id): Extension<String>,
) -> Result<Json<Vec<VersionResponse>>, ServiceError> {
    let db = dbstore::require_db()?;

    let owner = db
        .get_document_owner(&document_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found", document_id)))?;

    if !has_document_access(&db, &document_id, &owner, &user_id).await? {
        return Err(ServiceError::Authorization(
            "No access to this document".to_string(),
        ));
    }

    let versions = db.list_versions(&document_id).await?;
    Ok(Json(
        versions
            .into_iter()
            .map(|v| VersionResponse {
                id: v.id,
                document_id: v.document_id,
                created_at: v.created_at,
                created_by: v.created_by,
            })
            .collect(),
    ))
}
