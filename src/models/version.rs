use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A document version as listed in the history
#[derive(Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub id: String,
    pub document_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}
