use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for an uploaded file
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub filename: String,
    pub path: String,
}
