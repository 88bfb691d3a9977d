//! ConnectionRegistry の実装
//!
//! - `inmemory`: HashMap + RwLock を使った実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
