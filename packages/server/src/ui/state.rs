//! Shared state of the admin HTTP surface.

use std::sync::Arc;

use crate::usecase::ChatRoom;

/// Shared application state
pub struct AppState {
    /// ChatRoom（レジストリを参照するため）
    pub chat_room: Arc<ChatRoom>,
}
