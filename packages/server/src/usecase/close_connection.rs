//! UseCase: コネクション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseConnectionUseCase::execute() メソッド
//! - レジストリからの削除と、残りの参加者への退室メッセージ
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：未登録コネクションの切断（空の名前で通知する）
//! - エッジケース：同じコネクションの二重の切断（エントリ数は変わらない）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry, DisplayName};

use super::{broadcast::Broadcaster, message::departure_announcement};

/// コネクション切断のユースケース
pub struct CloseConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl CloseConnectionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// コネクション切断を実行
    ///
    /// A connection that was never registered still produces a departure
    /// announcement, with an empty name.
    ///
    /// # Returns
    ///
    /// 登録されていた表示名（未登録なら `None`）
    pub async fn execute(&self, connection: &Arc<dyn Connection>) -> Option<DisplayName> {
        let id = connection.id();

        // 1. レジストリから削除し、最後の表示名を取得
        let removed = self.registry.unregister(&id).await;
        let name = removed.clone().unwrap_or_default();
        let total = self.registry.count().await;
        tracing::info!("Connection closed: {} (Total: {})", name, total);

        // 2. 残りの全員に退室を通知
        self.broadcaster
            .broadcast(&departure_announcement(&name), id)
            .await;

        removed
    }
}
