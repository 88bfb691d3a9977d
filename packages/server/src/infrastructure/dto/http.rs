//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One open connection in the admin listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummaryDto {
    pub id: String,
    pub name: String,
    /// RFC 3339 (UTC)
    pub connected_at: String,
}

/// Response body of `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionListDto {
    pub count: usize,
    pub connections: Vec<ConnectionSummaryDto>,
}
