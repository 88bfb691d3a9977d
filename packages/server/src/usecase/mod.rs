//! UseCase layer
//!
//! イベントごとのポリシー（入室・発言・退室）と、ブロードキャストを提供します。

mod broadcast;
mod chat_room;
mod close_connection;
pub mod message;
mod open_connection;
mod relay_message;

pub use broadcast::Broadcaster;
pub use chat_room::ChatRoom;
pub use close_connection::CloseConnectionUseCase;
pub use open_connection::OpenConnectionUseCase;
pub use relay_message::RelayMessageUseCase;
