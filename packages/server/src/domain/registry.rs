//! ConnectionRegistry trait 定義
//!
//! 接続中のコネクションと表示名の対応を管理するインターフェースです。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 不変条件
//!
//! - 1 つのコネクションにつきエントリは最大 1 つ
//! - エントリ数は常に「開いているコネクション数」と一致する
//! - 未登録のコネクションに対する `lookup` / `unregister` はエラーではなく `None`

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connection, ConnectionId, DisplayName};

/// Registry entry together with the handle needed to reach it
#[derive(Clone)]
pub struct RegisteredConnection {
    pub connection: Arc<dyn Connection>,
    pub name: DisplayName,
    /// Unix timestamp (milliseconds, UTC) of registration
    pub connected_at: i64,
}

impl RegisteredConnection {
    pub fn id(&self) -> ConnectionId {
        self.connection.id()
    }
}

/// Concurrency-safe mapping from open connections to display names
///
/// Mutations are mutually exclusive with each other and with `snapshot`;
/// `lookup`, `snapshot` and `count` may run concurrently with one another.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 登録（既存エントリがある場合は上書き）
    async fn register(&self, connection: Arc<dyn Connection>, name: DisplayName);

    /// 登録解除。登録されていた表示名を返す
    async fn unregister(&self, id: &ConnectionId) -> Option<DisplayName>;

    /// 表示名を取得
    async fn lookup(&self, id: &ConnectionId) -> Option<DisplayName>;

    /// 現時点の全エントリを取得（順序は不定、重複なし）
    async fn snapshot(&self) -> Vec<RegisteredConnection>;

    /// 登録中のコネクション数を取得
    async fn count(&self) -> usize;
}
