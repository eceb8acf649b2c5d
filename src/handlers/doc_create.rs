use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::info;
use uuid::Uuid;

use crate::db::dbstore;
use crate::models::{CreateDocumentRequest, CreateDocumentResponse, ErrorResponse, ServiceError};

/// Create a new document owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = CreateDocumentResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_document(
    Extension(user_id): Extension<String>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<CreateDocumentResponse>), ServiceError> {
    let db = dbstore::require_db()?;

    let document_id = Uuid::new_v4().to_string();
    db.insert_document(&document_id, &payload.title, &user_id, &payload.content)
        .await?;

    info!("Document {} created by user {}", document_id, user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse { document_id }),
    ))
}
