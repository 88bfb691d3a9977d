//! Domain error types.

use thiserror::Error;

use super::ConnectionId;

/// Failure of a single non-blocking send
///
/// Broadcast absorbs these; they are only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// The connection's outbound pathway is gone (peer closed, writer stopped)
    #[error("Connection '{0}' is closed")]
    ConnectionClosed(ConnectionId),

    /// The connection's outbound queue is full (the peer is not reading)
    #[error("Outbound queue of connection '{0}' is full")]
    Full(ConnectionId),
}
