//! Test doubles shared by unit tests.

use std::{net::SocketAddr, sync::Mutex};

use crate::domain::{Connection, ConnectionId, PushError};

/// Connection that records every buffer it is asked to send
pub struct RecordingConnection {
    id: ConnectionId,
    remote_addr: SocketAddr,
    sent: Mutex<Vec<Vec<u8>>>,
}

impl RecordingConnection {
    pub fn new(remote_addr: &str) -> Self {
        Self {
            id: ConnectionId::generate(),
            remote_addr: remote_addr.parse().expect("valid socket address"),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Buffers sent so far, in send order
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// Sent buffers rendered as text, in send order
    pub fn received_text(&self) -> Vec<String> {
        self.received()
            .into_iter()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .collect()
    }
}

impl Connection for RecordingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    fn send(&self, bytes: Vec<u8>) -> Result<(), PushError> {
        self.sent.lock().unwrap().push(bytes);
        Ok(())
    }
}
