//! Server surface: TCP listener, per-connection loop, admin HTTP API.

mod error;
mod handler;
mod listen_addr;
mod server;
mod signal;
pub mod state;

pub use error::ServerError;
pub use handler::{http::admin_router, tcp::serve_connection};
pub use listen_addr::{DEFAULT_LISTEN_ADDR, ListenAddr, ListenAddrError};
pub use server::Server;
pub use signal::shutdown_signal;
