//! Connection capability set
//!
//! トランスポートが提供する接続ハンドルの抽象化です。
//! この trait を実装するトランスポートであれば差し替え可能です。
//!
//! - 同一性: `id()` がレジストリのキーになる
//! - リモートエンドポイント: `remote_addr()` がデフォルトの表示名になる
//! - ノンブロッキング送信: `send()` は所有権付きのバッファを受け取り、書き込み完了を待たない
//!
//! 受信側（読み取り）はトランスポートが行い、読み取ったバイト列を
//! `ChatEvent::Data` として渡します。

use std::net::SocketAddr;

use super::{ConnectionId, PushError};

/// One live client session, as seen by the core
#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    /// Identity used as the registry key
    fn id(&self) -> ConnectionId;

    /// Remote endpoint of the peer
    fn remote_addr(&self) -> SocketAddr;

    /// Queue `bytes` for delivery without waiting for the write to drain.
    ///
    /// The buffer is owned by the transport after the call. Two sends on the
    /// same connection are delivered in call order.
    fn send(&self, bytes: Vec<u8>) -> Result<(), PushError>;
}
