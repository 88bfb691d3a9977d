//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 受信したバイト列を "<name>: <payload>\n" にして送信者以外へ配信すること
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人接続中に 1 人が発言
//! - エッジケース：空のペイロード（何もしない）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

use super::{broadcast::Broadcaster, message::chat_line};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl RelayMessageUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// メッセージ中継を実行
    ///
    /// The payload is whatever bytes arrived together in one read; no line
    /// reassembly happens across calls.
    ///
    /// # Returns
    ///
    /// 配信を試みた宛先の数（空のペイロードなら 0）
    pub async fn execute(&self, connection: &Arc<dyn Connection>, payload: &[u8]) -> usize {
        if payload.is_empty() {
            return 0;
        }

        let id = connection.id();
        let name = self.registry.lookup(&id).await.unwrap_or_default();

        let recipients = self
            .broadcaster
            .broadcast(&chat_line(&name, payload), id)
            .await;

        tracing::info!(
            "Received from {}: {}",
            name,
            String::from_utf8_lossy(payload)
        );
        recipients
    }
}
