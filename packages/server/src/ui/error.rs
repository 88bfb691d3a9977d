//! Error types for the server surface.

use std::io;

use thiserror::Error;

use super::listen_addr::ListenAddrError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound (e.g. port already in use)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    InvalidListenAddr(#[from] ListenAddrError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
