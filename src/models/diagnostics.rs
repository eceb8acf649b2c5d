use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Diagnostics snapshot of the live collaboration subsystem and the host
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub n_conn: u32,
    pub n_sessions: u32,
    pub n_members: u32,
    pub cpu_usage: f32,
    pub memory_alloc: u64,
    pub memory_total: u64,
    pub memory_free: u64,
}
