//! Conversion logic between registry entries and DTOs.

use chatroom_shared::time::timestamp_to_rfc3339;

use crate::domain::RegisteredConnection;
use crate::infrastructure::dto::http::{ConnectionListDto, ConnectionSummaryDto};

// ========================================
// Domain → DTO
// ========================================

impl From<&RegisteredConnection> for ConnectionSummaryDto {
    fn from(entry: &RegisteredConnection) -> Self {
        Self {
            id: entry.id().to_string(),
            name: entry.name.as_str().to_string(),
            connected_at: timestamp_to_rfc3339(entry.connected_at),
        }
    }
}

impl From<Vec<RegisteredConnection>> for ConnectionListDto {
    /// Sorted by name, then by id, so the listing is stable across calls
    fn from(entries: Vec<RegisteredConnection>) -> Self {
        let mut connections: Vec<ConnectionSummaryDto> =
            entries.iter().map(ConnectionSummaryDto::from).collect();
        connections.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Self {
            count: connections.len(),
            connections,
        }
    }
}
