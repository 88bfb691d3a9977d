//! Infrastructure layer
//!
//! Domain 層が定義する trait の具体的な実装を提供します。
//!
//! - `registry`: ConnectionRegistry の実装（インメモリ）
//! - `transport`: Connection の実装（TCP）
//! - `dto`: HTTP 管理 API のレスポンス DTO

pub mod dto;
pub mod registry;
pub mod transport;
