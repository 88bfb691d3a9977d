//! Connection の実装
//!
//! ## 実装
//!
//! - `tcp`: tokio の TCP ストリームを使った実装

pub mod tcp;

pub use tcp::TcpConnection;
