use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use utoipa::ToSchema;

/// Request body for creating a document
#[serde_as]
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    pub title: String,
    /// Document content, base64 encoded
    #[serde_as(as = "Base64")]
    #[schema(value_type = String, format = Byte)]
    pub content: Vec<u8>,
}

/// Response for a created document
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentResponse {
    pub document_id: String,
}

/// A document with its content
#[serde_as]
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    #[serde_as(as = "Base64")]
    #[schema(value_type = String, format = Byte)]
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A document as listed, without its content
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for replacing a document's content
#[serde_as]
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateContentRequest {
    #[serde_as(as = "Base64")]
    #[schema(value_type = String, format = Byte)]
    pub content: Vec<u8>,
}

/// Response after a content update; the previous content was snapshotted
/// into the named version.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateContentResponse {
    pub document_id: String,
    pub version_id: String,
    pub status: String,
}
