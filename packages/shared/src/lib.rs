//! Utilities shared by the chatroom binaries.

pub mod logger;
pub mod time;
