//! Event dispatcher
//!
//! トランスポートから届くイベント（open / data / close）を 1 つの入口 `handle` で受け取り、
//! 対応するユースケースに振り分けます。
//! 合成したイベントを渡せば、実際のトランスポートなしでテストできます。

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionRegistry};

use super::{
    broadcast::Broadcaster, close_connection::CloseConnectionUseCase,
    open_connection::OpenConnectionUseCase, relay_message::RelayMessageUseCase,
};

/// The chat room: registry plus the policy applied to each event
pub struct ChatRoom {
    registry: Arc<dyn ConnectionRegistry>,
    open_connection_usecase: OpenConnectionUseCase,
    close_connection_usecase: CloseConnectionUseCase,
    relay_message_usecase: RelayMessageUseCase,
}

impl ChatRoom {
    /// Wire the use cases around one shared registry
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        let broadcaster = Arc::new(Broadcaster::new(registry.clone()));
        Self {
            open_connection_usecase: OpenConnectionUseCase::new(
                registry.clone(),
                broadcaster.clone(),
            ),
            close_connection_usecase: CloseConnectionUseCase::new(
                registry.clone(),
                broadcaster.clone(),
            ),
            relay_message_usecase: RelayMessageUseCase::new(registry.clone(), broadcaster),
            registry,
        }
    }

    /// Handle one transport event.
    ///
    /// # Returns
    ///
    /// Bytes to write to the event's own connection only (the welcome
    /// message on `Open`), `None` otherwise
    pub async fn handle(&self, event: ChatEvent) -> Option<Vec<u8>> {
        tracing::trace!(
            "Handling {} event for '{}'",
            event.kind(),
            event.connection().id()
        );
        match event {
            ChatEvent::Open(connection) => {
                Some(self.open_connection_usecase.execute(connection).await)
            }
            ChatEvent::Data(connection, payload) => {
                self.relay_message_usecase
                    .execute(&connection, &payload)
                    .await;
                None
            }
            ChatEvent::Close(connection) => {
                self.close_connection_usecase.execute(&connection).await;
                None
            }
        }
    }

    pub fn registry(&self) -> &Arc<dyn ConnectionRegistry> {
        &self.registry
    }

    /// Number of open connections, for diagnostics
    pub async fn connection_count(&self) -> usize {
        self.registry.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Connection, infrastructure::registry::InMemoryConnectionRegistry,
        testing::RecordingConnection,
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 合成したイベント列に対するチャットルーム全体の振る舞い
    //
    // 【どのようなシナリオをテストするか】
    // 1. C1, C2, C3 が接続 → C1 が発言 → C2 が切断
    // 2. C1, C3 が接続中に C4 が接続
    // 3. N 回の open と M 回の close の後のエントリ数
    // ========================================

    fn create_room() -> ChatRoom {
        ChatRoom::new(Arc::new(InMemoryConnectionRegistry::new()))
    }

    fn conn(addr: &str) -> Arc<RecordingConnection> {
        Arc::new(RecordingConnection::new(addr))
    }

    async fn open(room: &ChatRoom, conn: &Arc<RecordingConnection>) -> Option<Vec<u8>> {
        room.handle(ChatEvent::Open(conn.clone())).await
    }

    #[tokio::test]
    async fn test_message_then_departure_scenario() {
        // テスト項目: 発言は送信者以外に届き、切断は残りの参加者に通知される
        // given (前提条件): C1, C2, C3 の順に接続
        let room = create_room();
        let c1 = conn("10.0.0.1:4001");
        let c2 = conn("10.0.0.2:4002");
        let c3 = conn("10.0.0.3:4003");
        open(&room, &c1).await;
        open(&room, &c2).await;
        open(&room, &c3).await;
        let before = (c1.received().len(), c2.received().len(), c3.received().len());

        // when (操作): C1 が "hi" を送信
        let reply = room
            .handle(ChatEvent::Data(c1.clone(), b"hi".to_vec()))
            .await;

        // then (期待する結果):
        assert_eq!(reply, None);
        assert_eq!(c1.received().len(), before.0);
        assert_eq!(
            c2.received_text().last().map(String::as_str),
            Some("10.0.0.1:4001: hi\n")
        );
        assert_eq!(
            c3.received_text().last().map(String::as_str),
            Some("10.0.0.1:4001: hi\n")
        );
        assert_eq!(c2.received().len(), before.1 + 1);
        assert_eq!(c3.received().len(), before.2 + 1);

        // when (操作): C2 が切断
        room.handle(ChatEvent::Close(c2.clone())).await;

        // then (期待する結果):
        assert_eq!(
            c1.received_text().last().map(String::as_str),
            Some("10.0.0.2:4002 has left the chatroom.\n")
        );
        assert_eq!(
            c3.received_text().last().map(String::as_str),
            Some("10.0.0.2:4002 has left the chatroom.\n")
        );
        assert_eq!(room.connection_count().await, 2);
    }

    #[tokio::test]
    async fn test_join_scenario() {
        // テスト項目: 新規接続者にはウェルカムメッセージ、他の参加者には入室メッセージ
        // given (前提条件): C1, C3 が接続中
        let room = create_room();
        let c1 = conn("10.0.0.1:4001");
        let c3 = conn("10.0.0.3:4003");
        open(&room, &c1).await;
        open(&room, &c3).await;
        assert_eq!(room.connection_count().await, 2);

        // when (操作): C4 が接続
        let c4 = conn("10.0.0.4:4004");
        let welcome = open(&room, &c4).await;

        // then (期待する結果):
        let welcome = welcome.expect("open returns a welcome message");
        assert_eq!(welcome, b"Welcome to the chatroom.\n");
        assert_ne!(welcome, b"10.0.0.4:4004 has entered the chatroom.\n");
        assert_eq!(
            c1.received_text().last().map(String::as_str),
            Some("10.0.0.4:4004 has entered the chatroom.\n")
        );
        assert_eq!(
            c3.received_text().last().map(String::as_str),
            Some("10.0.0.4:4004 has entered the chatroom.\n")
        );
        assert!(c4.received().is_empty());
        assert_eq!(room.connection_count().await, 3);
    }

    #[tokio::test]
    async fn test_registry_size_after_opens_and_closes() {
        // テスト項目: エントリ数 = open 数 - 登録済みコネクションに一致した close 数
        // given (前提条件):
        let room = create_room();
        let conns: Vec<_> = (1..=6).map(|i| conn(&format!("10.0.0.{}:5000", i))).collect();
        for c in &conns {
            open(&room, c).await;
        }

        // when (操作): 2 つを切断し、1 つは二重に切断、未登録の 1 つも切断
        room.handle(ChatEvent::Close(conns[0].clone())).await;
        room.handle(ChatEvent::Close(conns[3].clone())).await;
        room.handle(ChatEvent::Close(conns[3].clone())).await;
        room.handle(ChatEvent::Close(conn("10.0.0.99:5000"))).await;

        // then (期待する結果):
        assert_eq!(room.connection_count().await, 4);
        assert_eq!(room.registry().snapshot().await.len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_events_for_distinct_connections() {
        // テスト項目: 異なるコネクションのイベントを並行に処理しても壊れない
        // given (前提条件):
        let room = Arc::new(create_room());
        let conns: Vec<_> = (0..32)
            .map(|i| conn(&format!("10.0.1.{}:6000", i)))
            .collect();

        // when (操作): 各コネクションは自分のタスク内で open → data → (偶数なら) close
        let mut handles = Vec::new();
        for (i, c) in conns.iter().cloned().enumerate() {
            let room = room.clone();
            handles.push(tokio::spawn(async move {
                room.handle(ChatEvent::Open(c.clone())).await;
                room.handle(ChatEvent::Data(c.clone(), b"ping".to_vec()))
                    .await;
                if i % 2 == 0 {
                    room.handle(ChatEvent::Close(c.clone())).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(room.connection_count().await, 16);
        for c in &conns {
            let own_prefix = format!("{}: ", c.remote_addr());
            assert!(
                c.received_text()
                    .iter()
                    .all(|line| !line.starts_with(&own_prefix))
            );
        }
    }
}
