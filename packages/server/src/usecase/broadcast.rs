//! UseCase: ブロードキャスト
//!
//! 送信者以外の全ての登録済みコネクションへメッセージを送ります。
//!
//! - 宛先ごとにバッファをコピーする（トランスポートが非同期に保持するため）
//! - 送信はノンブロッキングかつ fire-and-forget。個別の失敗はログに残すだけで、
//!   他の宛先への配信は中断しない
//! - レジストリは変更しない。スナップショットを取るので、
//!   配信中の join / leave があっても安全に完了する

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// Fan-out of one message to every registered connection but the sender
pub struct Broadcaster {
    registry: Arc<dyn ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `message` to every registered connection except `sender`.
    ///
    /// # Returns
    ///
    /// The number of recipients a send was attempted on, failed sends included
    pub async fn broadcast(&self, message: &[u8], sender: ConnectionId) -> usize {
        let recipients = self.registry.snapshot().await;

        let mut attempted = 0;
        for recipient in recipients.iter().filter(|entry| entry.id() != sender) {
            attempted += 1;
            if let Err(e) = recipient.connection.send(message.to_vec()) {
                tracing::warn!(
                    "Failed to push message to '{}': {}",
                    recipient.name,
                    e
                );
            }
        }

        tracing::debug!(
            "Broadcasted {} bytes from '{}' to {} connection(s)",
            message.len(),
            sender,
            attempted
        );
        attempted
    }
}
