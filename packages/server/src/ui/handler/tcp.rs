//! Per-connection TCP loop.
//!
//! Turns one accepted stream into the event sequence `Open`, `Data`*, `Close`.
//! Events of one connection are produced by one task, so they are delivered
//! in order and never overlap.

use std::{io::ErrorKind, net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite},
    net::TcpStream,
};

use crate::{
    domain::{ChatEvent, Connection},
    infrastructure::transport::TcpConnection,
    usecase::ChatRoom,
};

/// Size of the buffer one read fills at most
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Drive an accepted TCP stream until the peer goes away
pub async fn handle_stream(stream: TcpStream, peer: SocketAddr, chat_room: Arc<ChatRoom>) {
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY for {}: {}", peer, e);
    }
    let (reader, writer) = stream.into_split();
    serve_connection(reader, writer, peer, chat_room).await;
}

/// Drive one connection given its read and write halves.
///
/// Each successful read becomes one `Data` event carrying exactly the bytes
/// that arrived; there is no line reassembly. EOF or a read error ends the
/// connection with a `Close` event.
pub async fn serve_connection<R, W>(
    mut reader: R,
    writer: W,
    peer: SocketAddr,
    chat_room: Arc<ChatRoom>,
) where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (connection, _writer_task) = TcpConnection::spawn(peer, writer);
    let connection: Arc<dyn Connection> = Arc::new(connection);

    if let Some(welcome) = chat_room.handle(ChatEvent::Open(connection.clone())).await
        && let Err(e) = connection.send(welcome)
    {
        tracing::debug!("Failed to send welcome to {}: {}", peer, e);
    }

    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!("Peer {} closed the connection", peer);
                break;
            }
            Ok(n) => {
                chat_room
                    .handle(ChatEvent::Data(connection.clone(), buf[..n].to_vec()))
                    .await;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("Read from {} failed: {}", peer, e);
                break;
            }
        }
    }

    chat_room.handle(ChatEvent::Close(connection)).await;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader, duplex},
        time::timeout,
    };

    use super::*;
    use crate::{
        domain::{ConnectionRegistry, DisplayName},
        infrastructure::registry::InMemoryConnectionRegistry,
        testing::RecordingConnection,
    };

    const READ_TIMEOUT: Duration = Duration::from_secs(3);

    #[tokio::test]
    async fn test_serve_connection_lifecycle() {
        // テスト項目: 接続 → 発言 → 切断が Open / Data / Close として処理される
        // given (前提条件): 既存の参加者が 1 人いる
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let chat_room = Arc::new(ChatRoom::new(registry.clone()));
        let watcher = Arc::new(RecordingConnection::new("10.0.0.1:4000"));
        registry
            .register(watcher.clone(), DisplayName::new("watcher"))
            .await;

        let (client, server) = duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);
        let peer: SocketAddr = "10.0.0.2:5000".parse().unwrap();
        let task = tokio::spawn(serve_connection(
            server_read,
            server_write,
            peer,
            chat_room.clone(),
        ));
        let (client_read, mut client_write) = tokio::io::split(client);
        let mut client_read = BufReader::new(client_read);

        // when (操作): ウェルカムメッセージを受け取り、発言してから切断する
        let mut welcome = String::new();
        timeout(READ_TIMEOUT, client_read.read_line(&mut welcome))
            .await
            .unwrap()
            .unwrap();
        client_write.write_all(b"hello").await.unwrap();
        client_write.flush().await.unwrap();
        // 発言が処理されるまで待つ
        timeout(READ_TIMEOUT, async {
            while watcher.received().len() < 2 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        client_write.shutdown().await.unwrap();
        timeout(READ_TIMEOUT, task).await.unwrap().unwrap();

        // then (期待する結果):
        assert_eq!(welcome, "Welcome to the chatroom.\n");
        assert_eq!(
            watcher.received_text(),
            vec![
                "10.0.0.2:5000 has entered the chatroom.\n",
                "10.0.0.2:5000: hello\n",
                "10.0.0.2:5000 has left the chatroom.\n",
            ]
        );
        assert_eq!(registry.count().await, 1);
    }
}
