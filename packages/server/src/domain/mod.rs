//! Domain layer
//!
//! チャットリレーのコアとなる型と trait を定義します。
//! 具体的な実装（TCP トランスポート、インメモリのレジストリ）は Infrastructure 層が提供します。

pub mod connection;
pub mod error;
pub mod event;
pub mod registry;
pub mod value_object;

pub use connection::Connection;
#[cfg(test)]
pub use connection::MockConnection;
pub use error::PushError;
pub use event::ChatEvent;
pub use registry::{ConnectionRegistry, RegisteredConnection};
pub use value_object::{ConnectionId, DisplayName};
