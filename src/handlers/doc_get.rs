use axum::extract::Path;
use axum::{Extension, Json};

use crate::db::dbstore::{self, DbStore};
use crate::models::{DocumentResponse, DocumentSummary, ErrorResponse, ServiceError};

/// Whether the user owns the document or holds any permission on it.
pub(crate) async fn has_document_access(
    db: &DbStore,
    document_id: &str,
    owner_id: &str,
    user_id: &str,
) -> Result<bool, ServiceError> {
    if owner_id == user_id {
        return Ok(true);
    }
    Ok(db.get_permission(document_id, user_id).await?.is_some())
}

/// Fetch a document with its content
#[utoipa::path(
    get,
    path = "/api/documents/{document_id}",
    params(
        ("document_id" = String, Path, description = "Document identifier")
    ),
    responses(
        (status = 200, description = "The document", body = DocumentResponse),
        (status = 403, description = "No access to this document", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn get_document(
    Path(document_id): Path<String>,
    Extension(user_id): Extension<String>,
) -> Result<Json<DocumentResponse>, ServiceError> {
    let db = dbstore::require_db()?;

    let doc = db
        .get_document(&document_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found", document_id)))?;

    if !has_document_access(&db, &document_id, &doc.owner_id, &user_id).await? {
        return Err(ServiceError::Authorization(
            "No access to this document".to_string(),
        ));
    }

    Ok(Json(DocumentResponse {
        id: doc.id,
        title: doc.title,
        owner_id: doc.owner_id,
        content: doc.content,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }))
}

/// List documents the user owns or was granted access to
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "Accessible documents", body = [DocumentSummary])
    )
)]
pub async fn list_documents(
    Extension(user_id): Extension<String>,
) -> Result<Json<Vec<DocumentSummary>>, ServiceError> {
    let db = dbstore::require_db()?;

    let docs = db.list_documents_for(&user_id).await?;
    Ok(Json(
        docs.into_iter()
            .map(|d| DocumentSummary {
                id: d.id,
                title: d.title,
                owner_id: d.owner_id,
                created_at: d.created_at,
                updated_at: d.updated_at,
            })
            .collect(),
    ))
}
