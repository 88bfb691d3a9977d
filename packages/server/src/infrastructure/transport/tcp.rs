//! TCP を使った Connection 実装
//!
//! ## 責務
//!
//! - コネクションごとの送信キュー（容量付きの `Sender`）を管理
//! - 専用の writer タスクがキューからバッファを取り出し、順番にソケットへ書き込む
//!
//! ## 設計ノート
//!
//! ソケットの読み取りは UI 層（`ui/handler/tcp.rs`）が行います。
//! この実装は書き込み側（write half）だけを受け取り、送信に使用します。
//!
//! `send` はキューに積むだけなので書き込み完了を待ちません。
//! キューは FIFO なので、同じコネクションへの送信は呼び出し順に届きます。
//! 読まないクライアントのためにメモリが増え続けないよう、キューには上限があり、
//! 満杯のときの `send` は `PushError::Full` を返します（ブロードキャストはこれを無視します）。

use std::net::SocketAddr;

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::domain::{Connection, ConnectionId, PushError};

/// Buffers queued per connection before sends start failing with `Full`
pub const OUTBOUND_QUEUE_CAPACITY: usize = 1024;

/// Outbound queue of one connection
pub type OutboundChannel = mpsc::Sender<Vec<u8>>;

/// TCP を使った Connection 実装
pub struct TcpConnection {
    id: ConnectionId,
    remote_addr: SocketAddr,
    outbound: OutboundChannel,
}

impl TcpConnection {
    /// Create the connection and spawn its writer task.
    ///
    /// The writer task ends when every handle to the connection is dropped
    /// (after flushing what is already queued) or when a write fails.
    ///
    /// # Arguments
    ///
    /// * `remote_addr` - Peer address reported by `accept`
    /// * `writer` - Write half of the stream (e.g. `OwnedWriteHalf`)
    pub fn spawn<W>(remote_addr: SocketAddr, writer: W) -> (Self, JoinHandle<()>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self::spawn_with_capacity(remote_addr, writer, OUTBOUND_QUEUE_CAPACITY)
    }

    /// Same as [`TcpConnection::spawn`] with an explicit queue capacity
    pub fn spawn_with_capacity<W>(
        remote_addr: SocketAddr,
        writer: W,
        capacity: usize,
    ) -> (Self, JoinHandle<()>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let id = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = writer_loop(id, rx, writer);
        let connection = Self {
            id,
            remote_addr,
            outbound: tx,
        };
        (connection, handle)
    }
}

impl Connection for TcpConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    fn send(&self, bytes: Vec<u8>) -> Result<(), PushError> {
        self.outbound.try_send(bytes).map_err(|e| match e {
            TrySendError::Full(_) => PushError::Full(self.id),
            TrySendError::Closed(_) => PushError::ConnectionClosed(self.id),
        })
    }
}

/// Drains the outbound queue into the socket, one buffer at a time.
fn writer_loop<W>(
    id: ConnectionId,
    mut rx: mpsc::Receiver<Vec<u8>>,
    mut writer: W,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(bytes) = rx.recv().await {
            if let Err(e) = writer.write_all(&bytes).await {
                tracing::debug!("Failed to write to connection '{}': {}", id, e);
                break;
            }
        }
        let _ = writer.shutdown().await;
        tracing::debug!("Writer for connection '{}' stopped", id);
    })
}
