use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for granting or changing a document permission
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SetPermissionRequest {
    /// The user the permission is granted to
    pub user_id: String,
    /// Permission level, e.g. read or write
    pub permission: String,
}

/// Response for a permission mutation
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PermissionResponse {
    pub status: String,
}
