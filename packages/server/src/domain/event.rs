//! Transport events dispatched to the chat room.

use std::sync::Arc;

use super::Connection;

/// One event signaled by the transport for a specific connection
///
/// Events of the same connection arrive in order and never overlap; events
/// of different connections may be handled in parallel.
#[derive(Clone)]
pub enum ChatEvent {
    /// The connection was accepted and is ready for I/O
    Open(Arc<dyn Connection>),
    /// Bytes that arrived together in one read
    Data(Arc<dyn Connection>, Vec<u8>),
    /// The transport detected the connection is gone
    Close(Arc<dyn Connection>),
}

impl ChatEvent {
    pub fn connection(&self) -> &Arc<dyn Connection> {
        match self {
            ChatEvent::Open(conn) | ChatEvent::Data(conn, _) | ChatEvent::Close(conn) => conn,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::Open(_) => "open",
            ChatEvent::Data(_, _) => "data",
            ChatEvent::Close(_) => "close",
        }
    }
}
