//! UseCase: コネクション確立処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - OpenConnectionUseCase::execute() メソッド
//! - レジストリへの登録、入室メッセージのブロードキャスト、ウェルカムメッセージの返却
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存の参加者がいる状態での接続
//! - エッジケース：最初の 1 人の接続（ブロードキャスト対象なし）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry, DisplayName};

use super::{
    broadcast::Broadcaster,
    message::{WELCOME_MESSAGE, join_announcement},
};

/// コネクション確立のユースケース
pub struct OpenConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl OpenConnectionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// コネクション確立を実行
    ///
    /// # Returns
    ///
    /// 新しいコネクションだけに送るウェルカムメッセージ
    pub async fn execute(&self, connection: Arc<dyn Connection>) -> Vec<u8> {
        let id = connection.id();
        let name = DisplayName::from_addr(connection.remote_addr());

        // 1. レジストリに登録（このコネクションのメッセージを処理する前に完了させる）
        self.registry.register(connection, name.clone()).await;
        let total = self.registry.count().await;
        tracing::info!("New connection: {} (Total: {})", name, total);

        // 2. 他の全員に入室を通知
        self.broadcaster
            .broadcast(&join_announcement(&name), id)
            .await;

        // 3. 本人にはウェルカムメッセージだけを返す
        WELCOME_MESSAGE.to_vec()
    }
}
