//! InMemory ConnectionRegistry 実装
//!
//! HashMap をインメモリのレジストリとして使用します。
//! 読み取り（`lookup` / `snapshot` / `count`）は共有ロック、
//! 書き込み（`register` / `unregister`）は排他ロックで保護されるため、
//! ブロードキャストのファンアウト中の読み取り同士は互いにブロックしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chatroom_shared::time::{Clock, SystemClock};
use tokio::sync::RwLock;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, DisplayName, RegisteredConnection,
};

/// インメモリ ConnectionRegistry 実装
pub struct InMemoryConnectionRegistry {
    /// Key: ConnectionId, Value: handle + display name
    entries: RwLock<HashMap<ConnectionId, RegisteredConnection>>,
    /// 登録時刻の取得に使う Clock
    clock: Arc<dyn Clock>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Clock を指定して作成（テスト用）
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Arc<dyn Connection>, name: DisplayName) {
        let id = connection.id();
        let entry = RegisteredConnection {
            connection,
            name,
            connected_at: self.clock.now_millis(),
        };

        let mut entries = self.entries.write().await;
        if let Some(previous) = entries.insert(id, entry) {
            // 同じコネクションの open が二重に届いた（トランスポート側の不具合）
            tracing::warn!(
                "Connection '{}' was already registered as '{}', overwriting",
                id,
                previous.name
            );
        } else {
            tracing::debug!("Connection '{}' registered", id);
        }
    }

    async fn unregister(&self, id: &ConnectionId) -> Option<DisplayName> {
        let mut entries = self.entries.write().await;
        let removed = entries.remove(id).map(|entry| entry.name);
        if removed.is_none() {
            tracing::debug!("Connection '{}' was not registered, nothing to remove", id);
        }
        removed
    }

    async fn lookup(&self, id: &ConnectionId) -> Option<DisplayName> {
        let entries = self.entries.read().await;
        entries.get(id).map(|entry| entry.name.clone())
    }

    async fn snapshot(&self) -> Vec<RegisteredConnection> {
        let entries = self.entries.read().await;
        entries.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }
}
